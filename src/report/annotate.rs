//! Best-effort annotations for addresses and chain selectors

use crate::domain::{AddressBook, AnnotationContext, ChainResolver, ContextError, ADDRESSES_BY_CHAIN};

/// Looks up display-only context; never changes report structure
#[derive(Clone, Copy)]
pub struct Annotator<'a> {
    chains: &'a dyn ChainResolver,
}

impl<'a> Annotator<'a> {
    pub fn new(chains: &'a dyn ChainResolver) -> Self {
        Self { chains }
    }

    /// `address of <type> <version> from <chain>` for the first chain in the
    /// address book that registers `address`, or an empty string
    ///
    /// A context without an address book yields an empty string; a context
    /// holding something else under the address-book key is an error.
    pub fn address(&self, address: &str, ctx: &AnnotationContext) -> Result<String, ContextError> {
        let book = match ctx.get::<AddressBook>(ADDRESSES_BY_CHAIN) {
            Ok(book) => book,
            Err(ContextError::NotFound(_)) => return Ok(String::new()),
            Err(err) => return Err(err),
        };

        Ok(book
            .find(address)
            .map(|(selector, tv)| {
                format!(
                    "address of {} {} from {}",
                    tv.contract_type,
                    tv.version,
                    self.chain(selector)
                )
            })
            .unwrap_or_default())
    }

    /// Chain name, falling back to the selector itself
    pub fn chain(&self, chain_selector: u64) -> String {
        self.chains
            .name(chain_selector)
            .unwrap_or_else(|_| chain_selector.to_string())
    }
}

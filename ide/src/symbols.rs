//! Symbol-table capability supplied by the external Spin parser.

/// Synchronous symbol lookups for one file.
///
/// Rows use the `<tag>\t<declaration>` format (see [`analyzer::RawSymbol`]).
/// An empty `object_prefix` means local/global scope. Results are not cached:
/// every trigger issues a fresh query.
pub trait SymbolSource {
    fn lookup_members(&self, file_id: &str, object_prefix: &str) -> Vec<String>;

    fn lookup_constants(&self, file_id: &str, object_prefix: &str) -> Vec<String>;
}

impl<T: SymbolSource + ?Sized> SymbolSource for &T {
    fn lookup_members(&self, file_id: &str, object_prefix: &str) -> Vec<String> {
        (**self).lookup_members(file_id, object_prefix)
    }

    fn lookup_constants(&self, file_id: &str, object_prefix: &str) -> Vec<String> {
        (**self).lookup_constants(file_id, object_prefix)
    }
}

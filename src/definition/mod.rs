/// Definition resolution.
///
/// Given the node path produced by the locator and the front end's binding
/// tables, this module works out the canonical definition of the
/// identifier under the cursor.
///
/// Supported symbols:
///   - **Import specs**: the quoted path of an `import` line
///   - **Declarations**: top-level functions, methods, package-level
///     vars/consts/types, struct and interface fields
///   - **References**: package-level names, predeclared identifiers,
///     package qualifiers, struct literal keys
///   - **Selectors**: `x.F` / `x.M()` including members promoted through
///     any number of embedded structs and interfaces
///
/// - [`resolve`]: the entry point, import specs and declarations.
/// - [`member`]: references, struct literal keys and selectors.
/// - [`embedding`]: the embedding-chain walk that finds which type actually
///   declares a promoted member.
pub mod embedding;
pub(crate) mod member;
mod resolve;

pub use embedding::{DeclaringType, declaring_type};
pub use resolve::resolve;

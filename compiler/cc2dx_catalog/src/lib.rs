//! Symbol catalog for the Cocos2d to Cocos2d-x translator.
//!
//! The catalog is the translator's only source of vocabulary: identifier
//! renames (`NSString` to `CCString`), engine macros that must never be
//! namespace-qualified, class-side factory constructors that collapse into a
//! static `create`, explicit static-method renames, names deprecated by the
//! v3 engine, and headers with no C++ counterpart.
//!
//! A [`Catalog`] is an immutable value. Build it once with
//! [`Catalog::new`] and share it by reference with every translation; it
//! holds no interior mutability and is `Sync`.

mod catalog;
mod format;
mod tables;

pub use catalog::{looks_like_type_name, Catalog, TargetVersion, TARGET_NAMESPACE};
pub use format::rewrite_format_placeholders;

//! Programmatic SQL construction from typed fragments.
//!
//! The crate provides the primitives higher level statement builders sit on:
//! - [`Identifier`] / [`SegmentedName`] for case-folded and delimited SQL names.
//! - [`Parameter`] for named, typed, optionally valued bind variables and the
//!   [`Parameter::combine`] merge that reconciles repeated references.
//! - [`CodeBuilder`] which renders statement text with indentation and collects
//!   the positional parameter list handed to the execution layer.
//! - [`tokenize`] / [`normalize`] / [`Fragment`] for free-form SQL text that may
//!   embed `:name` parameter references.
//!
//! ```rust
//! use sqlfrag::*;
//!
//! let mut builder = CodeBuilder::new();
//! Fragment::parse("select :a, :a, :b from t")?.render(&mut builder)?;
//! let statement = builder.finish();
//! assert_eq!(statement.sql, "select ?, ?, ? from t");
//! assert_eq!(statement.parameters[0].positions, vec![1, 2]);
//! assert_eq!(statement.parameters[1].positions, vec![3]);
//! # Ok::<(), sqlfrag::Error>(())
//! ```
reexport!(testing, test);
reexport!(error);
reexport!(config);
reexport!(ident);
reexport!(param);
reexport!(code);
reexport!(sql);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}

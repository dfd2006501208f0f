//! Statement text assembly.
//!
//! [`CodeBuilder`] is a single-writer buffer: one instance renders one
//! statement or fragment. It keeps a stack of indentation frames and a
//! name-keyed parameter registry so that nested fragments can be rendered
//! recursively into the same output and still yield one positional parameter
//! list at the end.
crate::reexport!(indent);
crate::reexport!(placeholder);
crate::reexport!(statement);
crate::reexport!(builder);
crate::reexport!(builder_tests, test);

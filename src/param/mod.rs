//! Bind variable model.
//!
//! A [`Parameter`] is identified by its normalized name. Independently built
//! statement fragments may each reference the same parameter with partial
//! knowledge of its type or value; [`Parameter::combine`] reconciles those
//! references when the fragments are rendered together.
crate::reexport!(data_type);
crate::reexport!(value);
crate::reexport!(parameter);
crate::reexport!(positions);
crate::reexport!(adapter);
crate::reexport!(parameter_tests, test);

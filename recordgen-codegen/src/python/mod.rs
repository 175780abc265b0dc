//! Python (`pyschema`) source generation modules.

pub mod records;

pub use records::RecordGenerator;

/// Import statements every generated module starts with.
pub const HEADER: &str = "import pyschema\nfrom pyschema.types import *\n";

/// Comment placed at the top of every generated class body.
pub const WARNING_LINES: [&str; 2] = [
    "# WARNING: This class was generated by recordgen",
    "# there is a risk that any modification made to this class will be overwritten",
];

/// Statement used as the body of a class without fields.
pub const EMPTY_BODY: &str = "pass";

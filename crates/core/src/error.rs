/// All errors that can be returned when parsing a schema definition.
///
/// These cover structural authoring mistakes that make the definition
/// unusable as a whole. Recoverable mistakes inside an otherwise valid
/// schema (a dangling condition reference, a malformed `showConditions`
/// bag) are handled fail-open at compile time and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The definition root is not a JSON object.
    #[error("schema definition must be a JSON object")]
    NotAnObject,

    /// A field entry has no name.
    #[error("field entry {index} is missing a name")]
    UnnamedField { index: usize },

    /// Two fields declare the same name.
    #[error("duplicate field name '{name}': first declared at entry {first}")]
    DuplicateField { name: String, first: usize },

    /// A field entry has no type declaration.
    #[error("field '{name}' is missing a type declaration")]
    MissingType { name: String },

    /// A field declares a base kind this compiler does not know.
    #[error("unknown base kind '{base}' for field '{name}'")]
    UnknownKind { name: String, base: String },

    /// A choice field declares an empty literal set.
    #[error("choice field '{name}' declares no values")]
    EmptyChoice { name: String },

    /// A cross-field rule declaration is malformed.
    #[error("malformed rule declaration: {message}")]
    MalformedRule { message: String },
}

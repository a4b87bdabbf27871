pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported document unit in '{value}' (only 'mm' and 'cm' are recognized, on both axes)")]
    UnsupportedUnit { value: String },

    #[error("Unequal X/Y scaling is not supported (x: {x_scale}, y: {y_scale})")]
    AnisotropicScaling { x_scale: f64, y_scale: f64 },

    #[error("Encountered unknown element <{tag}>")]
    UnknownElement { tag: String },

    #[error("Encountered unsupported path command '{command}'")]
    UnsupportedPathCommand { command: char },

    #[error("Unknown placement anchor '{name}'")]
    InvalidAnchor { name: String },

    #[error("Missing required attribute '{attribute}' on <{tag}>")]
    MissingAttribute { tag: String, attribute: String },

    #[error("Malformed attribute '{attribute}' on <{tag}>: '{value}'")]
    MalformedAttribute {
        tag: String,
        attribute: String,
        value: String,
    },

    #[error("Malformed SVG markup: {message}")]
    MalformedMarkup { message: String },

    #[error("Malformed path data: {0}")]
    MalformedPathData(#[from] svgtypes::Error),

    #[error("Document contains no measurable content")]
    EmptyContent,
}

use thiserror::Error;

/// Errors reported when a property declaration cannot be turned into a
/// track. All of these surface at declaration time; frame computation
/// itself has no failure path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// The value read from the target could not be classified and the
    /// property has no default interpolator kind.
    #[error("no interpolator available for `{property}` (value `{value}`)")]
    UnresolvedType { property: String, value: String },

    /// A value expected to be a color failed to parse.
    #[error("`{value}` is not a valid color for `{property}`")]
    InvalidColor { property: String, value: String },

    /// A mutating call was made while the animation was running.
    /// Declarations are only allowed in the idle state.
    #[error("`{property}` cannot be declared while the animation is running")]
    AnimationRunning { property: String },

    /// The target has no readable value for the property.
    #[error("target has no property `{property}`")]
    MissingProperty { property: String },
}

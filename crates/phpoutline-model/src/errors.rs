use thiserror::Error;

/// Errors raised by the structural model
#[derive(Error, Debug)]
pub enum ModelError {
    /// A by-name lookup did not find a class
    #[error("Class '{0}' is unknown")]
    UnknownClass(String),

    /// A by-name lookup did not find an interface
    #[error("Interface '{0}' is unknown")]
    UnknownInterface(String),

    /// A by-name lookup did not find a trait
    #[error("Trait '{0}' is unknown")]
    UnknownTrait(String),

    /// A by-name lookup did not find a function
    #[error("Function '{0}' is unknown")]
    UnknownFunction(String),

    /// A by-name lookup did not find a method
    #[error("Method '{0}' is unknown")]
    UnknownMethod(String),

    /// A by-name lookup did not find a member
    #[error("Member '{0}' is unknown")]
    UnknownMember(String),

    /// A by-name lookup did not find a parameter
    #[error("Parameter '{0}' is unknown")]
    UnknownParameter(String),

    /// `merge` was called on records describing different declarations
    #[error("Not mergeable: '{target}' and '{incoming}' name different declarations")]
    NotMergeable { target: String, incoming: String },

    /// A class was flagged both abstract and final
    #[error("Class '{0}' cannot be abstract and final")]
    FinalAbstractClass(String),

    /// A method without a name cannot be attached to a parent
    #[error("Method without a name cannot be attached to '{0}'")]
    UnnamedMethod(String),
}

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while defining or projecting entity shapes.
///
/// These surface when the catalog is built or the shapes are generated,
/// never while handling a request. There is no recovery: the definition
/// must be fixed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("Definition error in {entity} at `{path}`: {reason}")]
    Definition {
        entity: String,
        path: String,
        reason: String,
    },

    #[error(
        "Projection ambiguity in {entity} at `{path}`: cannot tell whether `{type_name}` is a plain value or a nested entity"
    )]
    ProjectionAmbiguity {
        entity: String,
        path: String,
        type_name: String,
    },

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),
}

/// Path used for errors that concern the entity as a whole.
pub const ROOT_PATH: &str = "$";

impl ShapeError {
    pub fn definition(
        entity: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Definition {
            entity: entity.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// The entity the error was reported against, if any.
    pub fn entity(&self) -> &str {
        match self {
            Self::Definition { entity, .. } | Self::ProjectionAmbiguity { entity, .. } => entity,
            Self::UnknownEntity(name) => name,
        }
    }
}

/// Join a parent path and a field name (`inlays[].glass`).
pub(crate) fn child_path(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_string()
    } else {
        format!("{parent}.{field}")
    }
}

/// Path of the element type of an array or set.
pub(crate) fn element_path(parent: &str) -> String {
    format!("{parent}[]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_message_names_entity_and_path() {
        let err = ShapeError::definition("Project", "inlays[].id", "reserved field name");
        assert_eq!(
            err.to_string(),
            "Definition error in Project at `inlays[].id`: reserved field name"
        );
        assert_eq!(err.entity(), "Project");
    }

    #[test]
    fn paths_compose() {
        assert_eq!(child_path("", "inlays"), "inlays");
        assert_eq!(child_path(&element_path("inlays"), "glass"), "inlays[].glass");
    }
}

//! Display helper functions for entities

use shared::Entity;

/// Short form of a uuid for labels
pub fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

/// Outliner label for an entity
pub fn display_name(entity: &Entity) -> String {
    format!("{} ({})", entity.name, short_id(&entity.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Transform;

    #[test]
    fn test_short_id_truncates() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("ab"), "ab");
    }

    #[test]
    fn test_display_name() {
        let entity = Entity {
            id: "0123456789abcdef".into(),
            name: "Lumber 1".into(),
            profile_id: "stud-2x4".into(),
            transform: Transform::new(),
            locked: false,
            visible: true,
        };
        assert_eq!(display_name(&entity), "Lumber 1 (01234567)");
    }
}

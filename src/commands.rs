use crate::models::{Property, PropertyStatus};

/// Optimistic status edit that can be undone.
///
/// The edited property's previous status is captured before the change is
/// applied. Rollback only touches that property, and only while it still
/// carries the status this change wrote, so other edits and reloads made in
/// the meantime survive.
#[derive(Debug, Clone)]
pub struct StatusChange {
    property_id: String,
    status: PropertyStatus,
    previous: PropertyStatus,
}

impl StatusChange {
    /// Apply `status` to `property_id` in place. Returns `None` and leaves the
    /// collection untouched when no property has that id.
    pub fn apply(
        properties: &mut [Property],
        property_id: &str,
        status: PropertyStatus,
    ) -> Option<Self> {
        let property = properties.iter_mut().find(|p| p.id == property_id)?;
        let previous = property.status;
        property.status = status;

        Some(Self {
            property_id: property_id.to_string(),
            status,
            previous,
        })
    }

    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    pub fn status(&self) -> PropertyStatus {
        self.status
    }

    /// Status the property had before the change.
    pub fn previous_status(&self) -> PropertyStatus {
        self.previous
    }

    /// Restore the previous status. Returns whether anything was restored.
    pub fn rollback(self, properties: &mut [Property]) -> bool {
        match properties
            .iter_mut()
            .find(|p| p.id == self.property_id && p.status == self.status)
        {
            Some(property) => {
                property.status = self.previous;
                true
            }
            None => false,
        }
    }
}

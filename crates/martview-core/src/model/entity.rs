use crate::types::EntityId;
use serde::Deserialize;

///
/// Entity
///
/// One catalog record. A non-zero `group_size` marks a collapsed group
/// representative, which opens its group instead of navigating to a detail
/// view.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(from = "EntityWire")]
pub struct Entity {
    pub id: EntityId,
    pub group_size: u32,
    pub group_name: Option<String>,
    pub name: Option<String>,
}

impl Entity {
    #[must_use]
    pub const fn new(id: EntityId) -> Self {
        Self {
            id,
            group_size: 0,
            group_name: None,
            name: None,
        }
    }

    #[must_use]
    pub const fn group(id: EntityId, group_size: u32, group_name: Option<String>) -> Self {
        Self {
            id,
            group_size,
            group_name,
            name: None,
        }
    }

    #[must_use]
    pub const fn is_group(&self) -> bool {
        self.group_size > 0
    }

    /// Card title: the group name for a group representative, else the
    /// entity name.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        if self.is_group()
            && let Some(name) = self.group_name.as_deref()
        {
            return Some(name);
        }

        self.name.as_deref()
    }
}

// Wire shape: `{ id, entity_name, extra: { group_size, group_name } }`.
#[derive(Deserialize)]
struct EntityWire {
    id: EntityId,
    #[serde(default)]
    entity_name: Option<String>,
    #[serde(default)]
    extra: Option<EntityExtraWire>,
}

#[derive(Default, Deserialize)]
struct EntityExtraWire {
    #[serde(default)]
    group_size: Option<u32>,
    #[serde(default)]
    group_name: Option<String>,
}

impl From<EntityWire> for Entity {
    fn from(wire: EntityWire) -> Self {
        let extra = wire.extra.unwrap_or_default();
        let group_size = extra.group_size.unwrap_or(0);

        Self {
            id: wire.id,
            group_size,
            // a group name without a group is ignored
            group_name: if group_size > 0 { extra.group_name } else { None },
            name: wire.entity_name,
        }
    }
}

///
/// TESTS
///

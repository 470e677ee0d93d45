//! Node name resolution for limb roles.
//!
//! Concrete names are `namespace + side token + template`. Resolution never
//! touches its input map and produces a [`ResolvedNames`], a different type
//! from [`RoleMap`], so a resolved table cannot be prefixed a second time.

mod role_map;
mod side;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::limb::{LimbId, Role};

pub use role_map::{
    RigNaming, RoleMap, DEFAULT_BLEND_ATTRIBUTE, DEFAULT_FK_CONTROLS, DEFAULT_FK_JOINTS,
    DEFAULT_IK_CONTROLS, DEFAULT_IK_JOINTS, DEFAULT_SETTINGS_CONTROLS,
};
pub use side::{Namespace, Side, SideTokens};

/// Concrete node names for a set of roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedNames(BTreeMap<Role, String>);

impl ResolvedNames {
    /// Concrete name for a role.
    pub fn get(&self, role: Role) -> Option<&str> {
        self.0.get(&role).map(String::as_str)
    }

    /// Whether a role was resolved.
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains_key(&role)
    }

    /// Copy without the given roles.
    pub fn without(&self, roles: &[Role]) -> ResolvedNames {
        Self(
            self.0
                .iter()
                .filter(|(role, _)| !roles.contains(role))
                .map(|(role, name)| (*role, name.clone()))
                .collect(),
        )
    }

    /// Iterates `(role, name)` in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        self.0.iter().map(|(role, name)| (*role, name.as_str()))
    }

    /// Number of resolved roles.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was resolved.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Resolves every template in `map` to a concrete node name.
pub fn resolve(
    map: &RoleMap,
    side: Option<Side>,
    namespace: &Namespace,
    tokens: &SideTokens,
) -> ResolvedNames {
    let prefix = format!("{}{}", namespace, tokens.token(side));
    ResolvedNames(
        map.iter()
            .map(|(role, template)| (role, format!("{}{}", prefix, template)))
            .collect(),
    )
}

/// Resolves `map` for a limb, using its side and namespace.
pub fn resolve_limb(map: &RoleMap, limb: &LimbId, tokens: &SideTokens) -> ResolvedNames {
    resolve(map, limb.side, &limb.namespace, tokens)
}

/// Name of the settings control that carries a limb's blend attribute.
///
/// Returns `None` when the naming has no settings control for the limb kind.
pub fn settings_control(naming: &RigNaming, limb: &LimbId) -> Option<String> {
    naming.settings_controls.get(&limb.kind).map(|template| {
        format!(
            "{}{}{}",
            limb.namespace,
            naming.side_tokens.token(limb.side),
            template
        )
    })
}

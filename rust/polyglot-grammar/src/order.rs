//! Role ordering by word order.

use crate::profile::WordOrder;
use crate::schema::RoleSpec;

/// Arrange a command's roles in the order `word_order` places them.
///
/// Sorts by `sov_position` for SOV and by `svo_position` otherwise. Roles
/// without a hint for the active order go last; the sort is stable, so they
/// keep their declared relative order.
pub fn order_roles(roles: &[RoleSpec], word_order: WordOrder) -> Vec<&RoleSpec> {
    let mut ordered: Vec<&RoleSpec> = roles.iter().collect();
    ordered.sort_by_key(|spec| match spec.position_for(word_order) {
        Some(position) => (false, position),
        None => (true, 0),
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::SemanticRole;
    use pretty_assertions::assert_eq;

    fn roles_of(ordered: Vec<&RoleSpec>) -> Vec<SemanticRole> {
        ordered.into_iter().map(|spec| spec.role).collect()
    }

    fn set_roles() -> Vec<RoleSpec> {
        vec![
            RoleSpec::required(SemanticRole::Patient).svo_position(2).sov_position(1),
            RoleSpec::required(SemanticRole::Destination).svo_position(1).sov_position(2),
        ]
    }

    #[test]
    fn sov_uses_sov_positions() {
        assert_eq!(
            roles_of(order_roles(&set_roles(), WordOrder::Sov)),
            vec![SemanticRole::Patient, SemanticRole::Destination]
        );
    }

    #[test]
    fn svo_and_vso_use_svo_positions() {
        for order in [WordOrder::Svo, WordOrder::Vso] {
            assert_eq!(
                roles_of(order_roles(&set_roles(), order)),
                vec![SemanticRole::Destination, SemanticRole::Patient]
            );
        }
    }

    #[test]
    fn unhinted_roles_sort_last_in_declared_order() {
        let roles = vec![
            RoleSpec::optional(SemanticRole::Style),
            RoleSpec::optional(SemanticRole::Method),
            RoleSpec::required(SemanticRole::Patient).svo_position(5),
        ];
        assert_eq!(
            roles_of(order_roles(&roles, WordOrder::Svo)),
            vec![SemanticRole::Patient, SemanticRole::Style, SemanticRole::Method]
        );
    }
}

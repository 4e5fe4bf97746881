use crate::roles::{Attacker, Chaser, Guard, Role, RoleType};

/// The four role programs run every tick, one per [`RoleType`].
pub struct StrategyTable {
    roles: [Box<dyn Role>; 4],
}

impl Default for StrategyTable {
    fn default() -> Self {
        Self::new(
            Box::new(Attacker::new()),
            Box::new(Guard::own()),
            Box::new(Chaser::new()),
            Box::new(Guard::opponent()),
        )
    }
}

impl StrategyTable {
    pub fn new(
        own_attack: Box<dyn Role>,
        own_defend: Box<dyn Role>,
        opp_attack: Box<dyn Role>,
        opp_defend: Box<dyn Role>,
    ) -> Self {
        Self {
            roles: [own_attack, own_defend, opp_attack, opp_defend],
        }
    }

    /// Replace the program of one role.
    pub fn set_role(&mut self, role_type: RoleType, role: Box<dyn Role>) {
        self.roles[index(role_type)] = role;
    }

    pub fn role_mut(&mut self, role_type: RoleType) -> &mut dyn Role {
        self.roles[index(role_type)].as_mut()
    }
}

fn index(role_type: RoleType) -> usize {
    match role_type {
        RoleType::OwnAttack => 0,
        RoleType::OwnDefend => 1,
        RoleType::OppAttack => 2,
        RoleType::OppDefend => 3,
    }
}

use crate::domain::Role;

/// Something a role may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    BrowseMenu,
    ManageCart,
    PlaceOrder,
    ViewOwnOrders,
    ManageCatalog,
    ManageOrders,
}

const STUDENT: &[Capability] = &[
    Capability::BrowseMenu,
    Capability::ManageCart,
    Capability::PlaceOrder,
    Capability::ViewOwnOrders,
];

const ADMIN: &[Capability] = &[
    Capability::BrowseMenu,
    Capability::ManageCatalog,
    Capability::ManageOrders,
];

const GUEST: &[Capability] = &[Capability::BrowseMenu];

impl Role {
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Role::Student => STUDENT,
            Role::Admin => ADMIN,
            Role::Guest => GUEST,
        }
    }

    pub fn can(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

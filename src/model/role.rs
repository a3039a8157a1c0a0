#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Role {
    Student = 1,
    Teacher = 2,
}

impl Role {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Role::Student),
            2 => Some(Role::Teacher),
            _ => None,
        }
    }
}

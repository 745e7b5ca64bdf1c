#![forbid(unsafe_code)]

pub mod authz;
pub mod diff;
pub mod verbs;

pub mod ids {
    /// Tenant key. Every scoped query is keyed by one of these.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct OrgId(i64);

    impl OrgId {
        pub fn new(value: i64) -> Self {
            Self(value)
        }

        pub fn as_i64(self) -> i64 {
            self.0
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct UserId(i64);

    impl UserId {
        pub fn new(value: i64) -> Self {
            Self(value)
        }

        pub fn as_i64(self) -> i64 {
            self.0
        }
    }
}

pub mod model {
    /// Per-user role, scoped to one organization. The string forms are the
    /// wire contract and must round-trip unchanged.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Role {
        Admin,
        Manager,
        Member,
    }

    impl Role {
        pub const ALL: &[Role] = &[Role::Admin, Role::Manager, Role::Member];

        pub fn as_str(self) -> &'static str {
            match self {
                Role::Admin => "admin",
                Role::Manager => "manager",
                Role::Member => "member",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "admin" => Some(Role::Admin),
                "manager" => Some(Role::Manager),
                "member" => Some(Role::Member),
                _ => None,
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum TaskStatus {
        Todo,
        InProgress,
        Done,
    }

    impl TaskStatus {
        pub const ALL: &[TaskStatus] =
            &[TaskStatus::Todo, TaskStatus::InProgress, TaskStatus::Done];

        pub fn as_str(self) -> &'static str {
            match self {
                TaskStatus::Todo => "todo",
                TaskStatus::InProgress => "inprogress",
                TaskStatus::Done => "done",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "todo" => Some(TaskStatus::Todo),
                "inprogress" => Some(TaskStatus::InProgress),
                "done" => Some(TaskStatus::Done),
                _ => None,
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Priority {
        Low,
        Med,
        High,
    }

    impl Priority {
        pub const ALL: &[Priority] = &[Priority::Low, Priority::Med, Priority::High];

        pub fn as_str(self) -> &'static str {
            match self {
                Priority::Low => "low",
                Priority::Med => "med",
                Priority::High => "high",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value {
                "low" => Some(Priority::Low),
                "med" => Some(Priority::Med),
                "high" => Some(Priority::High),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::model::{Priority, Role, TaskStatus};

    #[test]
    fn enum_strings_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(*role));
        }
        for status in TaskStatus::ALL {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(*status));
        }
        for priority in Priority::ALL {
            assert_eq!(Priority::parse(priority.as_str()), Some(*priority));
        }
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert_eq!(Role::parse("owner"), None);
        assert_eq!(TaskStatus::parse("in_progress"), None);
        assert_eq!(Priority::parse("medium"), None);
    }
}

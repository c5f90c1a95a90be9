use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GoalFamily {
    NonDominance,
    Dominance,
}

impl GoalFamily {
    pub fn goal_file(self, counter_size: u32) -> String {
        match self {
            GoalFamily::NonDominance => format!("goal_{counter_size}.ltlf"),
            GoalFamily::Dominance => format!("goal_dominance_{counter_size}.ltlf"),
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            GoalFamily::NonDominance => "ND",
            GoalFamily::Dominance => "D",
        }
    }
}

/// A counter-game instance: a goal family played against `requests` increment requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Instance {
    pub family: GoalFamily,
    pub requests: u32,
}

impl Instance {
    pub fn new(family: GoalFamily, requests: u32) -> Self {
        Self { family, requests }
    }

    pub fn goal_file(&self, counter_size: u32) -> String {
        self.family.goal_file(counter_size)
    }

    pub fn env_file(&self) -> String {
        format!("env_{}.ltlf", self.requests)
    }

    pub fn id(&self) -> String {
        self.to_string()
    }

    /// Recovers the instance and counter size from a `goal[_dominance]_<N>.ltlf`
    /// and `env_<K>.ltlf` pair.
    pub fn from_files(goal_file: &str, env_file: &str) -> Option<(Self, u32)> {
        let goal = goal_file.strip_prefix("goal_")?.strip_suffix(".ltlf")?;
        let (family, counter) = match goal.strip_prefix("dominance_") {
            Some(counter) => (GoalFamily::Dominance, counter),
            None => (GoalFamily::NonDominance, goal),
        };
        let requests = env_file
            .strip_prefix("env_")?
            .strip_suffix(".ltlf")?
            .parse()
            .ok()?;
        Some((Self::new(family, requests), counter.parse().ok()?))
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.family.prefix(), self.requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names_follow_counter_game_convention() {
        let nd = Instance::new(GoalFamily::NonDominance, 3);
        let d = Instance::new(GoalFamily::Dominance, 10);
        assert_eq!(nd.goal_file(8), "goal_8.ltlf");
        assert_eq!(d.goal_file(8), "goal_dominance_8.ltlf");
        assert_eq!(nd.env_file(), "env_3.ltlf");
        assert_eq!(nd.id(), "ND-3");
        assert_eq!(d.id(), "D-10");
    }

    #[test]
    fn can_parse_instance_from_files() {
        assert_eq!(
            Instance::from_files("goal_dominance_8.ltlf", "env_4.ltlf"),
            Some((Instance::new(GoalFamily::Dominance, 4), 8))
        );
        assert_eq!(
            Instance::from_files("goal_2.ltlf", "env_1.ltlf"),
            Some((Instance::new(GoalFamily::NonDominance, 1), 2))
        );
        assert_eq!(Instance::from_files("goal_x.ltlf", "env_1.ltlf"), None);
        assert_eq!(Instance::from_files("goal_2.ltlf", "env.ltlf"), None);
    }
}

//! Role assignment for a deliberation run

use crate::core::error::DomainError;
use crate::core::model::Model;
use crate::council::role::{CouncilRole, DeliberationMode};
use serde::{Deserialize, Serialize};

/// Minimum number of Classic-mode members
pub const MIN_MEMBERS: usize = 2;
/// Maximum number of Classic-mode members
pub const MAX_MEMBERS: usize = 3;

/// Maps each council role required by a mode to a model (Value Object)
///
/// The variant fixes the protocol, so an assignment can never be handed
/// to the wrong state machine. [`validate`](RoleAssignment::validate) is
/// called before any provider call is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RoleAssignment {
    Classic {
        members: Vec<Model>,
        chairman: Model,
    },
    Debate {
        proponent: Model,
        opponent: Model,
        chairman: Model,
    },
}

impl RoleAssignment {
    pub fn classic(members: Vec<Model>, chairman: Model) -> Self {
        Self::Classic { members, chairman }
    }

    pub fn debate(proponent: Model, opponent: Model, chairman: Model) -> Self {
        Self::Debate {
            proponent,
            opponent,
            chairman,
        }
    }

    pub fn mode(&self) -> DeliberationMode {
        match self {
            RoleAssignment::Classic { .. } => DeliberationMode::Classic,
            RoleAssignment::Debate { .. } => DeliberationMode::Debate,
        }
    }

    /// All seats in protocol order, paired with their roles
    pub fn seats(&self) -> Vec<(CouncilRole, &Model)> {
        match self {
            RoleAssignment::Classic { members, chairman } => {
                let mut seats: Vec<_> = members
                    .iter()
                    .enumerate()
                    .map(|(i, m)| (CouncilRole::Member(i + 1), m))
                    .collect();
                seats.push((CouncilRole::Chairman, chairman));
                seats
            }
            RoleAssignment::Debate {
                proponent,
                opponent,
                chairman,
            } => vec![
                (CouncilRole::Proponent, proponent),
                (CouncilRole::Opponent, opponent),
                (CouncilRole::Chairman, chairman),
            ],
        }
    }

    /// Validate completeness and distinctness of the assignment.
    ///
    /// Classic requires 2 or 3 members plus a chairman; Debate requires
    /// proponent, opponent, and chairman. All seats must be held by
    /// distinct models.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let RoleAssignment::Classic { members, .. } = self {
            if members.len() < MIN_MEMBERS || members.len() > MAX_MEMBERS {
                return Err(DomainError::InvalidConfiguration(format!(
                    "Classic mode requires {} to {} members, got {}",
                    MIN_MEMBERS,
                    MAX_MEMBERS,
                    members.len()
                )));
            }
        }

        let seats = self.seats();
        for (i, (role_a, model_a)) in seats.iter().enumerate() {
            for (role_b, model_b) in seats.iter().skip(i + 1) {
                if model_a == model_b {
                    return Err(DomainError::InvalidConfiguration(format!(
                        "{} and {} are both assigned to {}",
                        role_a, role_b, model_a
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_classic_assignment() {
        let assignment =
            RoleAssignment::classic(vec![Model::Gpt4o, Model::Claude35Sonnet], Model::Claude3Opus);
        assert!(assignment.validate().is_ok());
        assert_eq!(assignment.mode(), DeliberationMode::Classic);
    }

    #[test]
    fn test_classic_member_count_bounds() {
        let too_few = RoleAssignment::classic(vec![Model::Gpt4o], Model::Claude3Opus);
        assert!(too_few.validate().is_err());

        let too_many = RoleAssignment::classic(
            vec![
                Model::Gpt4o,
                Model::Claude35Sonnet,
                Model::Llama3,
                Model::Mistral,
            ],
            Model::Claude3Opus,
        );
        assert!(too_many.validate().is_err());
    }

    #[test]
    fn test_duplicate_seat_rejected() {
        let assignment =
            RoleAssignment::classic(vec![Model::Gpt4o, Model::Gpt4o], Model::Claude3Opus);
        let err = assignment.validate().unwrap_err();
        assert!(matches!(err, DomainError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_debate_chairman_must_differ() {
        let assignment =
            RoleAssignment::debate(Model::Gpt4o, Model::Claude35Sonnet, Model::Gpt4o);
        assert!(assignment.validate().is_err());
    }

    #[test]
    fn test_classic_seat_order() {
        let assignment =
            RoleAssignment::classic(vec![Model::Gpt4o, Model::Llama3], Model::Claude3Opus);
        let seats = assignment.seats();
        assert_eq!(seats.len(), 3);
        assert_eq!(seats[0].0, CouncilRole::Member(1));
        assert_eq!(seats[1].0, CouncilRole::Member(2));
        assert_eq!(seats[2].0, CouncilRole::Chairman);
    }
}

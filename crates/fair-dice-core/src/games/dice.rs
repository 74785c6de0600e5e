//! Dice model and command-line dice parsing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minimum number of dice in a game
pub const MIN_DICE: usize = 3;

/// Maximum number of dice in a game (one sampler byte per pick)
pub const MAX_DICE: usize = 256;

/// Minimum number of faces on a dice
pub const MIN_FACES: usize = 2;

/// Maximum number of faces on a dice (one sampler byte per roll)
pub const MAX_FACES: usize = 256;

/// Errors from building or parsing dice
///
/// `position` is the dice index in the argument list. It is 0 for a dice
/// built on its own.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("At least {} dice are required, got {count}. Example: 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7", MIN_DICE)]
    TooFewDice { count: usize },

    #[error("At most {} dice are supported, got {count}", MAX_DICE)]
    TooManyDice { count: usize },

    #[error("Dice {position} has {count} face(s); each dice needs at least {}", MIN_FACES)]
    TooFewFaces { position: usize, count: usize },

    #[error("Dice {position} has {count} faces; at most {} are supported", MAX_FACES)]
    TooManyFaces { position: usize, count: usize },

    #[error("Dice {position} contains {token:?}, which is not an integer")]
    NotAnInteger { position: usize, token: String },
}

impl DiceError {
    fn at(self, position: usize) -> Self {
        match self {
            DiceError::TooFewFaces { count, .. } => DiceError::TooFewFaces { position, count },
            DiceError::TooManyFaces { count, .. } => DiceError::TooManyFaces { position, count },
            DiceError::NotAnInteger { token, .. } => DiceError::NotAnInteger { position, token },
            other => other,
        }
    }
}

/// Immutable list of faces
///
/// Serialized as a plain face array; deserializing applies the same face
/// count limits as [`DiceSet::new`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct DiceSet {
    faces: Vec<i64>,
}

impl DiceSet {
    /// Create a dice from its faces
    pub fn new(faces: Vec<i64>) -> Result<Self, DiceError> {
        let count = faces.len();
        if count < MIN_FACES {
            return Err(DiceError::TooFewFaces { position: 0, count });
        }
        if count > MAX_FACES {
            return Err(DiceError::TooManyFaces { position: 0, count });
        }
        Ok(Self { faces })
    }

    pub fn faces(&self) -> &[i64] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Always false; a dice has at least two faces
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Face at `index`
    pub fn face(&self, index: usize) -> Option<i64> {
        self.faces.get(index).copied()
    }

    /// Largest face index, the range of a roll
    pub fn max_index(&self) -> usize {
        self.faces.len() - 1
    }
}

impl FromStr for DiceSet {
    type Err = DiceError;

    /// Parse a comma separated face list such as `2,2,4,4,9,9`
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let faces = text
            .split(',')
            .map(|token| {
                let token = token.trim();
                token.parse::<i64>().map_err(|_| DiceError::NotAnInteger {
                    position: 0,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(faces)
    }
}

impl TryFrom<Vec<i64>> for DiceSet {
    type Error = DiceError;

    fn try_from(faces: Vec<i64>) -> Result<Self, Self::Error> {
        Self::new(faces)
    }
}

impl From<DiceSet> for Vec<i64> {
    fn from(dice: DiceSet) -> Self {
        dice.faces
    }
}

impl fmt::Display for DiceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, face) in self.faces.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", face)?;
        }
        write!(f, "]")
    }
}

/// Parse one dice per argument, enforcing the game's dice count limits
pub fn parse_dice_list<I, S>(groups: I) -> Result<Vec<DiceSet>, DiceError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let dice = groups
        .into_iter()
        .enumerate()
        .map(|(position, group)| {
            group
                .as_ref()
                .parse::<DiceSet>()
                .map_err(|e| e.at(position))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if dice.len() < MIN_DICE {
        return Err(DiceError::TooFewDice { count: dice.len() });
    }
    if dice.len() > MAX_DICE {
        return Err(DiceError::TooManyDice { count: dice.len() });
    }
    Ok(dice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dice() {
        let dice = DiceSet::from_str("2,2,4,4,9,9").unwrap();
        assert_eq!(dice.faces(), &[2, 2, 4, 4, 9, 9]);
        assert_eq!(dice.len(), 6);
        assert_eq!(dice.max_index(), 5);
        assert_eq!(dice.face(5), Some(9));
        assert_eq!(dice.face(6), None);
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_negatives() {
        let dice = DiceSet::from_str(" -1, 0 ,7").unwrap();
        assert_eq!(dice.faces(), &[-1, 0, 7]);
    }

    #[test]
    fn test_display() {
        let dice = DiceSet::from_str("1,1,6,6,8,8").unwrap();
        assert_eq!(dice.to_string(), "[1,1,6,6,8,8]");
    }

    #[test]
    fn test_parse_list() {
        let dice = parse_dice_list(["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap();
        assert_eq!(dice.len(), 3);
        assert_eq!(dice[2].faces(), &[3, 3, 5, 5, 7, 7]);
    }

    #[test]
    fn test_too_few_dice() {
        assert_eq!(
            parse_dice_list(["1,2", "3,4"]),
            Err(DiceError::TooFewDice { count: 2 })
        );
        assert_eq!(
            parse_dice_list(Vec::<String>::new()),
            Err(DiceError::TooFewDice { count: 0 })
        );
    }

    #[test]
    fn test_too_few_faces() {
        assert_eq!(
            parse_dice_list(["1,2", "3", "5,6"]),
            Err(DiceError::TooFewFaces {
                position: 1,
                count: 1
            })
        );
    }

    #[test]
    fn test_not_an_integer() {
        assert_eq!(
            parse_dice_list(["1,2", "3,4", "5,x"]),
            Err(DiceError::NotAnInteger {
                position: 2,
                token: "x".to_string()
            })
        );
        assert_eq!(
            parse_dice_list(["1,2", "3,4", "5,2.5"]),
            Err(DiceError::NotAnInteger {
                position: 2,
                token: "2.5".to_string()
            })
        );
    }

    #[test]
    fn test_empty_entry_is_not_an_integer() {
        assert!(matches!(
            DiceSet::from_str("1,,2"),
            Err(DiceError::NotAnInteger { .. })
        ));
    }

    #[test]
    fn test_too_many_faces() {
        let faces = vec![1i64; MAX_FACES + 1];
        assert_eq!(
            DiceSet::new(faces),
            Err(DiceError::TooManyFaces {
                position: 0,
                count: MAX_FACES + 1
            })
        );
        assert!(DiceSet::new(vec![1i64; MAX_FACES]).is_ok());
    }

    #[test]
    fn test_str_parse() {
        let dice: DiceSet = "3,3,5,5,7,7".parse().unwrap();
        assert_eq!(dice.faces(), &[3, 3, 5, 5, 7, 7]);
        assert_eq!(
            "4".parse::<DiceSet>(),
            Err(DiceError::TooFewFaces {
                position: 0,
                count: 1
            })
        );
    }

    #[test]
    fn test_serializes_as_face_array() {
        let dice = DiceSet::from_str("1,1,6,6,8,8").unwrap();
        let json = serde_json::to_string(&dice).unwrap();

        assert_eq!(json, "[1,1,6,6,8,8]");
        assert_eq!(serde_json::from_str::<DiceSet>(&json).unwrap(), dice);
    }

    #[test]
    fn test_deserialize_checks_face_count() {
        assert!(serde_json::from_str::<DiceSet>("[]").is_err());
        assert!(serde_json::from_str::<DiceSet>("[7]").is_err());

        let too_many = serde_json::to_string(&vec![1i64; MAX_FACES + 1]).unwrap();
        let err = serde_json::from_str::<DiceSet>(&too_many).unwrap_err();
        assert!(err.to_string().contains("at most 256"));
    }

    #[test]
    fn test_too_many_dice() {
        let groups = vec!["1,2"; MAX_DICE + 1];
        assert_eq!(
            parse_dice_list(groups),
            Err(DiceError::TooManyDice {
                count: MAX_DICE + 1
            })
        );
    }
}

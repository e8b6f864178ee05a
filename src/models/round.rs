use crate::error::ProgressError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 招生类型（فراخوان）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundType {
    /// 硕士优秀人才
    MaTalent,
    /// 博士优秀人才
    PhdTalent,
    /// 博士考试
    PhdExam,
    /// 科学奥林匹克
    Olympiad,
}

impl RoundType {
    pub const ALL: [RoundType; 4] = [
        RoundType::MaTalent,
        RoundType::PhdTalent,
        RoundType::PhdExam,
        RoundType::Olympiad,
    ];

    /// 线上使用的代码
    pub fn code(self) -> &'static str {
        match self {
            RoundType::MaTalent => "MA_TALENT",
            RoundType::PhdTalent => "PHD_TALENT",
            RoundType::PhdExam => "PHD_EXAM",
            RoundType::Olympiad => "OLYMPIAD",
        }
    }

    /// 门户显示名称
    pub fn label(self) -> &'static str {
        match self {
            RoundType::MaTalent => "استعداد درخشان کارشناسی ارشد",
            RoundType::PhdTalent => "استعداد درخشان دکتری",
            RoundType::PhdExam => "آزمون دکتری",
            RoundType::Olympiad => "المپیاد علمی",
        }
    }

    pub fn is_phd(self) -> bool {
        matches!(self, RoundType::PhdTalent | RoundType::PhdExam)
    }
}

impl FromStr for RoundType {
    type Err = ProgressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "MA_TALENT" => Ok(RoundType::MaTalent),
            "PHD_TALENT" => Ok(RoundType::PhdTalent),
            "PHD_EXAM" => Ok(RoundType::PhdExam),
            "OLYMPIAD" => Ok(RoundType::Olympiad),
            other => Err(ProgressError::InvalidRoundType(other.to_string())),
        }
    }
}

impl std::fmt::Display for RoundType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// 学历层次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DegreeLevel {
    Bsc,
    Msc,
    Phd,
}

impl DegreeLevel {
    pub fn label(self) -> &'static str {
        match self {
            DegreeLevel::Bsc => "کارشناسی",
            DegreeLevel::Msc => "کارشناسی ارشد",
            DegreeLevel::Phd => "دکتری",
        }
    }
}

impl std::fmt::Display for DegreeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// 性别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// 空字符串或未知值视为未填写
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "MALE" => Some(Gender::Male),
            "FEMALE" => Some(Gender::Female),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_type_round_trips_through_code() {
        for round in RoundType::ALL {
            assert_eq!(round.code().parse::<RoundType>().unwrap(), round);
        }
    }

    #[test]
    fn test_unknown_round_type_is_rejected() {
        let err = "BSC_TALENT".parse::<RoundType>().unwrap_err();
        assert_eq!(err, ProgressError::InvalidRoundType("BSC_TALENT".to_string()));
    }

    #[test]
    fn test_only_phd_rounds_are_phd() {
        assert!(RoundType::PhdTalent.is_phd());
        assert!(RoundType::PhdExam.is_phd());
        assert!(!RoundType::MaTalent.is_phd());
        assert!(!RoundType::Olympiad.is_phd());
    }

    #[test]
    fn test_blank_gender_is_unset() {
        assert_eq!(Gender::parse(""), None);
        assert_eq!(Gender::parse("FEMALE"), Some(Gender::Female));
    }
}

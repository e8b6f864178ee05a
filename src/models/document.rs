use super::round::DegreeLevel;
use phf::phf_map;
use serde::{Deserialize, Serialize};

/// 上传文件的类型
///
/// 后端与各页面对同一类型的拼写不一致（`BSC_CERT` / `BSC_CERTIFICATE` 等），
/// 所有拼写都归一到同一个变体，未知代码归为 `Other`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    PersonalPhoto,
    #[serde(alias = "NATIONAL_ID")]
    NationalCard,
    #[serde(alias = "BIRTH_CERTIFICATE")]
    IdCard,
    BscTranscript,
    #[serde(alias = "BSC_CERT")]
    BscCertificate,
    MscTranscript,
    #[serde(alias = "MSC_CERT")]
    MscCertificate,
    MscExcellenceCert,
    OlympiadCert,
    #[serde(alias = "ENGLISH_TEST_CERT")]
    LanguageCertificate,
    RecommendationLetter,
    ResearchProposal,
    EnrollmentCert,
    #[serde(other)]
    Other,
}

static DOCUMENT_LABELS: phf::Map<&'static str, &'static str> = phf_map! {
    "PERSONAL_PHOTO" => "عکس پرسنلی",
    "NATIONAL_CARD" => "کارت ملی",
    "ID_CARD" => "شناسنامه",
    "BSC_TRANSCRIPT" => "ریز نمرات کارشناسی",
    "BSC_CERTIFICATE" => "مدرک کارشناسی",
    "MSC_TRANSCRIPT" => "ریز نمرات کارشناسی ارشد",
    "MSC_CERTIFICATE" => "مدرک کارشناسی ارشد",
    "MSC_EXCELLENCE_CERT" => "فرم رتبه ممتاز ارشد",
    "OLYMPIAD_CERT" => "فرم کسب رتبه در المپیاد علمی",
    "LANGUAGE_CERTIFICATE" => "مدرک زبان",
    "RECOMMENDATION_LETTER" => "توصیه‌نامه",
    "RESEARCH_PROPOSAL" => "پروپوزال پژوهشی",
    "ENROLLMENT_CERT" => "گواهی اشتغال به تحصیل",
    "OTHER" => "سایر مدارک",
};

impl DocumentType {
    /// 规范代码（上传时使用）
    pub fn code(self) -> &'static str {
        match self {
            DocumentType::PersonalPhoto => "PERSONAL_PHOTO",
            DocumentType::NationalCard => "NATIONAL_CARD",
            DocumentType::IdCard => "ID_CARD",
            DocumentType::BscTranscript => "BSC_TRANSCRIPT",
            DocumentType::BscCertificate => "BSC_CERTIFICATE",
            DocumentType::MscTranscript => "MSC_TRANSCRIPT",
            DocumentType::MscCertificate => "MSC_CERTIFICATE",
            DocumentType::MscExcellenceCert => "MSC_EXCELLENCE_CERT",
            DocumentType::OlympiadCert => "OLYMPIAD_CERT",
            DocumentType::LanguageCertificate => "LANGUAGE_CERTIFICATE",
            DocumentType::RecommendationLetter => "RECOMMENDATION_LETTER",
            DocumentType::ResearchProposal => "RESEARCH_PROPOSAL",
            DocumentType::EnrollmentCert => "ENROLLMENT_CERT",
            DocumentType::Other => "OTHER",
        }
    }

    /// 波斯语名称
    pub fn label(self) -> &'static str {
        DOCUMENT_LABELS.get(self.code()).copied().unwrap_or("سایر مدارک")
    }

    /// 某学历的成绩单；博士学历没有对应的上传类型
    pub fn transcript_for(degree: DegreeLevel) -> Option<Self> {
        match degree {
            DegreeLevel::Bsc => Some(DocumentType::BscTranscript),
            DegreeLevel::Msc => Some(DocumentType::MscTranscript),
            DegreeLevel::Phd => None,
        }
    }

    /// 某学历的毕业证书
    pub fn certificate_for(degree: DegreeLevel) -> Option<Self> {
        match degree {
            DegreeLevel::Bsc => Some(DocumentType::BscCertificate),
            DegreeLevel::Msc => Some(DocumentType::MscCertificate),
            DegreeLevel::Phd => None,
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(code: &str) -> DocumentType {
        serde_json::from_value(serde_json::Value::String(code.to_string())).unwrap()
    }

    #[test]
    fn test_backend_spellings_fold_to_canonical() {
        assert_eq!(parse("BSC_CERT"), DocumentType::BscCertificate);
        assert_eq!(parse("BSC_CERTIFICATE"), DocumentType::BscCertificate);
        assert_eq!(parse("MSC_CERT"), DocumentType::MscCertificate);
        assert_eq!(parse("NATIONAL_ID"), DocumentType::NationalCard);
        assert_eq!(parse("ENGLISH_TEST_CERT"), DocumentType::LanguageCertificate);
    }

    #[test]
    fn test_unknown_code_is_other() {
        assert_eq!(parse("BOOK_COVER"), DocumentType::Other);
    }

    #[test]
    fn test_every_type_has_label() {
        assert_eq!(DocumentType::NationalCard.label(), "کارت ملی");
        assert_eq!(DocumentType::MscTranscript.label(), "ریز نمرات کارشناسی ارشد");
        assert_eq!(DocumentType::Other.label(), "سایر مدارک");
    }

    #[test]
    fn test_phd_degree_has_no_document_pair() {
        assert_eq!(DocumentType::transcript_for(DegreeLevel::Phd), None);
        assert_eq!(
            DocumentType::certificate_for(DegreeLevel::Bsc),
            Some(DocumentType::BscCertificate)
        );
    }
}

//! 文档序列化协议
//!
//! 每种节点都可以转换为嵌套映射（`serde_json::Value`）并从中恢复，
//! 加载时按类型校验，结构不符时返回 `DocumentError::Malformed`。

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::{AppResult, DocumentError};
use crate::models::course::{Certification, LearningPath, Module, Unit};
use crate::models::question::CertificationQuestions;

pub trait Document: Serialize + DeserializeOwned {
    /// 文档类型名（用于错误信息）
    const KIND: &'static str;

    fn to_document(&self) -> AppResult<JsonValue> {
        serde_json::to_value(self).map_err(|e| {
            DocumentError::SerializeFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn from_document(document: JsonValue) -> AppResult<Self> {
        serde_json::from_value(document)
            .map_err(|e| DocumentError::malformed(Self::KIND, e).into())
    }

    fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| {
            DocumentError::SerializeFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn from_yaml(content: &str, origin: &str) -> AppResult<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| DocumentError::malformed(format!("{} {}", Self::KIND, origin), e).into())
    }

    fn to_json_pretty(&self) -> AppResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            DocumentError::SerializeFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    fn from_json(content: &str, origin: &str) -> AppResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| DocumentError::malformed(format!("{} {}", Self::KIND, origin), e).into())
    }
}

impl Document for Certification {
    const KIND: &'static str = "certification";
}

impl Document for LearningPath {
    const KIND: &'static str = "learning_path";
}

impl Document for Module {
    const KIND: &'static str = "module";
}

impl Document for Unit {
    const KIND: &'static str = "unit";
}

impl Document for CertificationQuestions {
    const KIND: &'static str = "certification_questions";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use serde_json::json;

    fn fixture() -> Certification {
        Certification::with_learning_paths(vec![
            LearningPath::with_modules(
                "Describe cloud concepts",
                vec![Module::with_units(
                    "Describe cloud computing",
                    vec![
                        Unit::with_content("Introduction", "Cloud basics."),
                        Unit::new("Summary"),
                    ],
                )],
            ),
            LearningPath::new("Describe Azure architecture"),
        ])
    }

    #[test]
    fn test_certification_document_shape() {
        let document = fixture().to_document().unwrap();
        assert_eq!(
            document,
            json!({
                "certification_content": [
                    {
                        "learning_path_title": "Describe cloud concepts",
                        "modules_in_learning_path": [
                            {
                                "module_title": "Describe cloud computing",
                                "units_in_module": [
                                    {"unit_title": "Introduction", "unit_content": "Cloud basics."},
                                    {"unit_title": "Summary", "unit_content": null}
                                ]
                            }
                        ]
                    },
                    {
                        "learning_path_title": "Describe Azure architecture",
                        "modules_in_learning_path": []
                    }
                ]
            })
        );
    }

    #[test]
    fn test_round_trip_every_level() {
        let certification = fixture();
        let restored = Certification::from_document(certification.to_document().unwrap()).unwrap();
        assert_eq!(restored, certification);

        let learning_path = certification.certification_content[0].clone();
        assert_eq!(
            LearningPath::from_document(learning_path.to_document().unwrap()).unwrap(),
            learning_path
        );

        let module = learning_path.modules_in_learning_path[0].clone();
        assert_eq!(Module::from_document(module.to_document().unwrap()).unwrap(), module);

        let unit = module.units_in_module[1].clone();
        assert_eq!(Unit::from_document(unit.to_document().unwrap()).unwrap(), unit);
    }

    #[test]
    fn test_yaml_round_trip_keeps_null_content() {
        let certification = fixture();
        let yaml = certification.to_yaml().unwrap();
        assert!(yaml.contains("unit_content: null"));
        assert_eq!(Certification::from_yaml(&yaml, "az-900.yml").unwrap(), certification);
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let result = Module::from_document(json!({ "module_title": "Orphan" }));
        match result {
            Err(AppError::Document(DocumentError::Malformed { origin, reason })) => {
                assert_eq!(origin, "module");
                assert!(reason.contains("units_in_module"));
            }
            other => panic!("应该返回 Malformed，实际: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_field_is_malformed() {
        let result = Unit::from_document(json!({
            "unit_title": "Intro",
            "unit_content": "text",
            "unit_duration": 3
        }));
        assert!(matches!(
            result,
            Err(AppError::Document(DocumentError::Malformed { .. }))
        ));
    }

    #[test]
    fn test_wrong_type_is_malformed() {
        let yaml = "certification_content: \"not a list\"\n";
        assert!(Certification::from_yaml(yaml, "broken.yml").is_err());
    }
}

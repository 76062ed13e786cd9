use serde::{Deserialize, Serialize};

/// 单选题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub answers: Vec<String>,
    pub correct_answer: String,
    pub explanation: String,
}

/// 出题能力对单个单元返回的结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questions {
    pub questions: Vec<Question>,
}

/// 按学习路径分组的题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPathQuestions {
    pub learning_path_title: String,
    pub questions: Vec<Question>,
}

/// 最终输出的题目文档
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificationQuestions {
    pub certification_title: String,
    pub questions: Vec<LearningPathQuestions>,
}

impl CertificationQuestions {
    /// 题目总数
    pub fn question_count(&self) -> usize {
        self.questions.iter().map(|group| group.questions.len()).sum()
    }
}

//! 课程流水线 - 编排层
//!
//! 一个认证代码对应一组固定的产物路径：
//!
//! ```text
//! <data_root>/<code>/official_course_material/<code>.yml   抓取
//! <data_root>/<code>/cleaned_course_material/<code>.yml    清洗
//! <data_root>/<code>/question_files/questions.json         出题
//! ```
//!
//! 每个阶段读取上一阶段的产物；产物不存在时在任何写操作之前报错。

use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::error::{AppResult, StageError};
use crate::infrastructure::PageNavigator;
use crate::models::{load_document, save_document, Certification, CertificationQuestions};
use crate::services::{QuestionGenerator, TextCleaner};
use crate::utils::logging::{log_stage_complete, log_stage_start};
use crate::workflow::certification::validate_root_url;
use crate::workflow::{
    clean_concurrently, generate_questions_concurrently, get_certification_metadata, Cleanable,
    Questionable, Scrapable,
};

const DIRECTORY_OFFICIAL_COURSE: &str = "official_course_material";
const DIRECTORY_CLEANED_COURSE: &str = "cleaned_course_material";
const DIRECTORY_QUESTIONS: &str = "question_files";
const QUESTION_FILENAME: &str = "questions.json";

/// 流水线阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scrape,
    Clean,
    GenerateQuestions,
}

impl Stage {
    /// 生成该阶段产物的命令
    pub fn command(self) -> &'static str {
        match self {
            Stage::Scrape => "scrap-only",
            Stage::Clean => "clean-only",
            Stage::GenerateQuestions => "generate-questions",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Scrape => "抓取",
            Stage::Clean => "清洗",
            Stage::GenerateQuestions => "出题",
        };
        f.write_str(name)
    }
}

/// 单个认证的流水线
pub struct CoursePipeline {
    code: String,
    data_root: PathBuf,
}

impl CoursePipeline {
    pub fn new(code: impl Into<String>, data_root: impl Into<PathBuf>) -> Self {
        Self {
            code: code.into(),
            data_root: data_root.into(),
        }
    }

    fn course_dir(&self) -> PathBuf {
        self.data_root.join(&self.code)
    }

    /// 阶段产物路径
    pub fn artifact_path(&self, stage: Stage) -> PathBuf {
        let course_file = format!("{}.yml", self.code);
        match stage {
            Stage::Scrape => self.course_dir().join(DIRECTORY_OFFICIAL_COURSE).join(course_file),
            Stage::Clean => self.course_dir().join(DIRECTORY_CLEANED_COURSE).join(course_file),
            Stage::GenerateQuestions => self
                .course_dir()
                .join(DIRECTORY_QUESTIONS)
                .join(QUESTION_FILENAME),
        }
    }

    /// 确认某阶段的产物已存在
    pub fn require(&self, stage: Stage) -> AppResult<PathBuf> {
        let path = self.artifact_path(stage);
        if !path.is_file() {
            return Err(StageError::PreviousStepsNeeded {
                missing: stage.to_string(),
                path: path.display().to_string(),
                command: format!("{} {}", stage.command(), self.code),
            }
            .into());
        }
        Ok(path)
    }

    /// 题目文档中的认证标题
    pub fn certification_title(&self, title: &str) -> String {
        format!("{} - {}", self.code, title)
    }

    /// 阶段一：校验根 URL，打开认证首页读取元数据，抓取整棵课程树并写入 YAML
    pub async fn run_scrape(
        &self,
        navigator: &mut dyn PageNavigator,
        root_url: &str,
        check_mode: bool,
    ) -> AppResult<PathBuf> {
        log_stage_start("抓取课程", &self.code);
        if check_mode {
            info!("🔍 检查模式：每层只抓取前几个子节点");
        }

        validate_root_url(root_url)?;
        navigator.navigate_to(root_url).await?;
        let metadata = get_certification_metadata(navigator, root_url).await?;
        if metadata.code.as_deref().is_some_and(|code| !code.eq_ignore_ascii_case(&self.code)) {
            warn!("⚠️ 页面认证代码与目录不一致: {:?} / {}", metadata.code, self.code);
        }

        let mut certification = Certification::new();
        certification.scrap(navigator, check_mode).await?;
        info!(
            "✓ 共抓取 {} 个学习路径，{} 个单元",
            certification.certification_content.len(),
            certification.units().count()
        );

        let output = self.artifact_path(Stage::Scrape);
        save_document(&output, &certification).await?;
        log_stage_complete("抓取课程", &output.display().to_string());
        Ok(output)
    }

    /// 阶段二：清洗抓取产物
    pub async fn run_clean(&self, cleaner: &dyn TextCleaner, concurrency: usize) -> AppResult<PathBuf> {
        let input = self.require(Stage::Scrape)?;
        log_stage_start("清洗课程", &self.code);

        let mut certification: Certification = load_document(&input).await?;
        if concurrency > 1 {
            clean_concurrently(&mut certification, cleaner, concurrency).await?;
        } else {
            certification.clean(cleaner).await?;
        }

        let output = self.artifact_path(Stage::Clean);
        save_document(&output, &certification).await?;
        log_stage_complete("清洗课程", &output.display().to_string());
        Ok(output)
    }

    /// 阶段三：为清洗后的课程出题，按学习路径分组写入 JSON
    pub async fn run_generate_questions(
        &self,
        generator: &dyn QuestionGenerator,
        title: &str,
        concurrency: usize,
    ) -> AppResult<CertificationQuestions> {
        let input = self.require(Stage::Clean)?;
        log_stage_start("生成题目", &self.code);

        let certification: Certification = load_document(&input).await?;
        let groups = if concurrency > 1 {
            generate_questions_concurrently(&certification, generator, concurrency).await?
        } else {
            certification.generate_questions(generator).await?
        };

        let questions = CertificationQuestions {
            certification_title: self.certification_title(title),
            questions: groups,
        };
        info!("✓ 共生成 {} 道题", questions.question_count());

        let output = self.artifact_path(Stage::GenerateQuestions);
        save_document(&output, &questions).await?;
        log_stage_complete("生成题目", &output.display().to_string());
        Ok(questions)
    }
}

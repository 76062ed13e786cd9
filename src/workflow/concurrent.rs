//! 并发转换
//!
//! 以单元为粒度把清洗/出题请求并发地发给外部能力。
//! `buffered` 按提交顺序产出结果，所以输出顺序与逐个执行时完全相同。

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use crate::error::AppResult;
use crate::models::{Certification, LearningPathQuestions};
use crate::services::{QuestionGenerator, TextCleaner};
use crate::workflow::{Cleanable, Questionable};

/// 并发清洗所有单元；任一单元失败即返回错误
pub async fn clean_concurrently(
    certification: &mut Certification,
    cleaner: &dyn TextCleaner,
    concurrency: usize,
) -> AppResult<()> {
    let concurrency = concurrency.max(1);
    info!("🧹 并发清洗，并发数 {}", concurrency);

    stream::iter(certification.units_mut().map(|unit| unit.clean(cleaner)))
        .buffered(concurrency)
        .try_collect::<Vec<()>>()
        .await?;
    Ok(())
}

/// 并发为所有单元出题，再按学习路径分组
pub async fn generate_questions_concurrently(
    certification: &Certification,
    generator: &dyn QuestionGenerator,
    concurrency: usize,
) -> AppResult<Vec<LearningPathQuestions>> {
    let concurrency = concurrency.max(1);
    info!("📝 并发出题，并发数 {}", concurrency);

    let requests = certification
        .certification_content
        .iter()
        .enumerate()
        .flat_map(|(index, learning_path)| {
            learning_path.units().map(move |unit| async move {
                let questions = unit.generate_questions(generator).await?;
                AppResult::Ok((index, questions))
            })
        });
    let results: Vec<_> = stream::iter(requests)
        .buffered(concurrency)
        .try_collect()
        .await?;

    let mut groups: Vec<LearningPathQuestions> = certification
        .certification_content
        .iter()
        .map(|learning_path| LearningPathQuestions {
            learning_path_title: learning_path.learning_path_title.clone(),
            questions: Vec::new(),
        })
        .collect();
    for (index, questions) in results {
        groups[index].questions.extend(questions);
    }
    Ok(groups)
}

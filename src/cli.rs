//! 命令行参数

use clap::{Parser, Subcommand};

/// 抓取 Microsoft Learn 认证课程并生成练习题
#[derive(Debug, Parser)]
#[command(name = "cert_trainer", version)]
pub struct Cli {
    /// 检查模式：每层只抓取前几个页面
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// 显示调试日志
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 列出认证目录中的所有认证
    Courses,
    /// 检查 URL 是否为可抓取的认证首页，成功后加入认证目录
    TestOnly {
        #[arg(long)]
        url: String,
    },
    /// 按认证目录中的 URL 抓取课程内容
    ScrapOnly { certification_code: String },
    /// 清洗抓取到的课程内容
    CleanOnly { certification_code: String },
    /// 根据清洗后的课程内容生成选择题
    GenerateQuestions { certification_code: String },
}

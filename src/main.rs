//! # Project Store - 命令行入口
//!
//! 在当前进程内组装 store 和宿主端命令，逐个添加命令行给出的路径，最后打印项目列表。
//!
//! ```text
//! project-store [--data-dir <dir>] [<path>...]
//! ```
//!
//! 日志级别通过 `RUST_LOG` 环境变量控制（默认 `info`）。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use project_store::{AddProjectParams, HostConfig, open_local};

/// 将路径添加为项目并打印项目列表
#[derive(Debug, Parser)]
#[command(name = "project-store", version)]
struct Args {
    /// 数据目录（默认为平台本地数据目录下的 project-store）
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// 要添加为项目的目录
    paths: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = match HostConfig::load(args.data_dir).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("加载配置失败: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = match open_local(config).await {
        Ok(store) => store,
        Err(e) => {
            eprintln!("初始化项目列表失败: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _subscription = store.subscribe(|projects| {
        log::info!("项目列表已更新，共 {} 个项目", projects.len());
    });

    let mut failed = false;
    for path in args.paths {
        match store.add(AddProjectParams::new(path)).await {
            Ok(project) => println!("+ {} ({})", project.title, project.path),
            Err(e) => {
                eprintln!("{}", e);
                failed = true;
            }
        }
    }

    for project in store.projects().iter() {
        println!("{}\t{}\t{}", project.id, project.title, project.path);
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_dir_and_paths() {
        let args =
            Args::try_parse_from(["project-store", "--data-dir", "/tmp/data", "/a", "/b"]).unwrap();
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/data")));
        assert_eq!(args.paths, vec!["/a".to_string(), "/b".to_string()]);
    }

    #[test]
    fn test_parse_without_arguments() {
        let args = Args::try_parse_from(["project-store"]).unwrap();
        assert!(args.data_dir.is_none());
        assert!(args.paths.is_empty());
    }

    #[test]
    fn test_data_dir_requires_value() {
        assert!(Args::try_parse_from(["project-store", "--data-dir"]).is_err());
    }

    #[test]
    fn test_help_is_not_a_usage_error() {
        let err = Args::try_parse_from(["project-store", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}

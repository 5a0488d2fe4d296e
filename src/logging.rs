use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// 初始化日志，写入文件（终端处于备用屏幕，不能直接输出）
///
/// 级别由 `RUST_LOG` 控制，默认 info
pub fn init_logger(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))
}

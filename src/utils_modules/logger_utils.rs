use crate::common::*;

#[doc = "Log line format shared by file and stdout output"]
fn custom_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] T[{}] [{}:{}] {}",
        now.now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        std::thread::current().name().unwrap_or("unknown"),
        record.module_path().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        &record.args()
    )
}

#[doc = "전역 로거 설정 - 일 단위로 로그파일을 rotate 하고 stdout 에도 출력한다."]
/// # Returns
/// * anyhow::Result<LoggerHandle> - the handle must be kept alive for the lifetime of the program
pub fn set_global_logger() -> anyhow::Result<LoggerHandle> {
    let log_directory: &str = "logs";

    let handle: LoggerHandle = Logger::try_with_env_or_str("info")
        .map_err(|e| anyhow!("[logger_utils -> set_global_logger] {:?}", e))?
        .log_to_file(
            FileSpec::default()
                .directory(log_directory)
                .basename("elastic_proxy"),
        )
        .duplicate_to_stdout(Duplicate::Info)
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(10),
        )
        .format_for_files(custom_format)
        .format_for_stdout(custom_format)
        .start()
        .map_err(|e| anyhow!("[logger_utils -> set_global_logger] {:?}", e))?;

    Ok(handle)
}

use socksframe_codec::ReplyStatus;

use crate::cmd::StatusArgs;
use crate::exit::{CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_statuses, OutputFormat, StatusOutput};

pub fn run(args: StatusArgs, format: OutputFormat) -> CliResult<i32> {
    if args.all {
        let statuses: Vec<StatusOutput> = ReplyStatus::ALL
            .iter()
            .map(|status| StatusOutput::new(status.code()))
            .collect();
        print_statuses(&statuses, format);
        return Ok(SUCCESS);
    }

    let code = args
        .code
        .ok_or_else(|| CliError::new(DATA_INVALID, "no status code given"))?;
    if ReplyStatus::from_code(code).is_none() {
        return Err(CliError::new(
            DATA_INVALID,
            format!("unknown reply status code: {code}"),
        ));
    }

    print_statuses(&[StatusOutput::new(code)], format);
    Ok(SUCCESS)
}

use clap::{Arg, ArgAction, Command};

pub const CMD_TEMPLATE: &str = "template";
pub const CMD_UPLOAD_NILAI: &str = "upload-nilai";

pub const ARG_WITHOUT_STATUS: &str = "without-status";
pub const ARG_OUT: &str = "out";
pub const ARG_FILE: &str = "file";

#[must_use]
pub fn template_command() -> Command {
    Command::new(CMD_TEMPLATE)
        .about("Download the score and result template spreadsheet")
        .arg(
            Arg::new(ARG_WITHOUT_STATUS)
                .long(ARG_WITHOUT_STATUS)
                .help("Leave out the pass/fail column")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new(ARG_OUT)
                .long(ARG_OUT)
                .short('o')
                .help("Directory to save the file in")
                .default_value("."),
        )
}

#[must_use]
pub fn upload_command() -> Command {
    Command::new(CMD_UPLOAD_NILAI)
        .about("Upload a filled-in score spreadsheet")
        .arg(
            Arg::new(ARG_FILE)
                .help("Spreadsheet to upload")
                .required(true),
        )
}

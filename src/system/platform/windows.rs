use super::CopyCommand;

pub fn copy_command_candidates() -> Vec<CopyCommand> {
    vec![CopyCommand::new("clip", &[])]
}

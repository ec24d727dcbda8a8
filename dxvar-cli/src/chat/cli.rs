use clap::Command;

pub const CHAT_CMD: &str = "chat";

pub fn create_chat_cli() -> Command {
    Command::new(CHAT_CMD).about(
        "Interactive session: enter variants or rsIDs, pick alleles by number and ask follow-up questions",
    )
}

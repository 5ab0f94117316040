use teloxide::utils::command::BotCommands;

use crate::bot::dispatcher::Command;

/* Help command.
 * Displays a list of commands available to the user.
 */
pub fn help_reply() -> String {
    Command::descriptions().to_string()
}

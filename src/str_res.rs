use colored::Colorize;
use lazy_static::lazy_static;

pub const WELCOME: &str = "Learn about Soroban and how to create smart \
                           contracts for the Stellar network!\nChoose a \
                           module to start your journey.";

pub const ABOUT: &str = "This tutorial was created to help developers learn \
                         about Soroban and how to create smart contracts for \
                         the Stellar network.\nDeveloped with support from \
                         the Stellar community.";

pub const HELP: &str = "[number] open module · [n]ext lesson · [s]ubmit \
                        code · [m]odules · [h]ome · [a]bout · [q]uit";

lazy_static! {
    pub static ref TUTOR: String =
        "[ Stellar Supreme Tutorial ]".bold().truecolor(253, 218, 36).to_string();
    pub static ref INFORMATIONAL: String =
        "(read only)".white().dimmed().italic().to_string();
    pub static ref CHALLENGE: String =
        "(challenge)".yellow().italic().to_string();
}

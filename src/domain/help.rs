/// Usage text shown by `help` and at REPL start.
pub const HELP_TEXT: &str = "\
envedit: a scoped environment variable editor

Can be used through a one-at-a-time command line interface (CLI),
or interactively through a read evaluate print loop (REPL).

To access the REPL, run envedit with no commands,
or alternatively provide the -i flag.

envedit defaults to User variables.
To target System variables, use the -s flag with any of the commands
(CLI only; in the REPL use cd).

Available Commands
------------------
help, h: display this help menu
ls: list the variables available in the current scope
get name: print the value of variable name
set name value...: set the value of variable name (words joined with spaces)
rm name: delete the variable name
append name value...: append value to variable name (-t: show result, do not write)

REPL Specific Commands
----------------------
quit, q: quit the REPL
cd: toggle between user/system scope";

//! The literal rule table. Codes are grouped by family (E, W, S, SEC, P).
//! Gaps in the numbering are intentional and preserved rather than filled;
//! see DESIGN.md for the reserved ranges.

use crate::types::{Rule, RuleSeverity};

macro_rules! rule {
    ($code:literal, $severity:expr, $name:literal, $explanation:literal, $recommendation:literal) => {
        Rule {
            code: $code,
            severity: $severity,
            name: $name,
            explanation: $explanation,
            recommendation: $recommendation,
        }
    };
}

pub static CATALOG: [Rule; 151] = [
    // --- Error family: hard syntax/semantic faults -------------------------
    rule!("E001", RuleSeverity::Error, "Unbalanced parentheses",
        "The running parenthesis depth across the file goes negative or fails to return to zero, meaning a block is opened without a matching close or closed without ever being opened.",
        "Count every `(` and `)` outside quoted strings and caret escapes; add or remove one to restore balance."),
    rule!("E002", RuleSeverity::Error, "Undefined label target",
        "A GOTO or CALL :label names a target that is not defined anywhere in the file, other than the built-in :EOF.",
        "Define the missing label, or correct the spelling of the target."),
    rule!("E003", RuleSeverity::Error, "IF keyword not separated by whitespace",
        "IF is immediately followed by a condition token with no intervening space, which some command-processor versions refuse to parse.",
        "Insert a space between IF and the condition, e.g. `IF EXIST` not `IFEXIST`."),
    rule!("E004", RuleSeverity::Error, "IF EXIST mixed with comparison operator",
        "An IF EXIST test is combined with == on the same clause, which is not valid IF syntax and silently fails.",
        "Split into two IF statements, or replace IF EXIST with a direct string comparison."),
    rule!("E005", RuleSeverity::Error, "Reserved device name used as a file target",
        "A redirection or file argument names a reserved device (CON, PRN, AUX, NUL, COM1-9, LPT1-9), which cannot be created as a regular file.",
        "Choose a non-reserved file name."),
    rule!("E006", RuleSeverity::Error, "Undefined variable referenced",
        "A %NAME% or !NAME! reference is not a parameter, a FOR variable in scope, a well-known environment variable, or defined earlier in the script.",
        "Define the variable before this line with SET, or confirm the name is spelled correctly."),
    rule!("E007", RuleSeverity::Error, "Unquoted empty-string comparison",
        "IF %VAR%==\"\" compares an unquoted expansion against a quoted empty string; if VAR is undefined the comparison degenerates to a parse error rather than a clean empty match.",
        "Quote both sides: IF \"%VAR%\"==\"\"."),
    rule!("E008", RuleSeverity::Error, "Unreachable code",
        "This line cannot be reached under the script's control flow: the nearest preceding executable line is an unconditional EXIT or GOTO that is not inside a parenthesized block.",
        "Remove the dead code, or restructure the preceding control flow so this line is reachable."),
    rule!("E009", RuleSeverity::Error, "Unmatched double quote",
        "The line contains an odd number of double quotes outside caret escapes, leaving a quoted region unterminated for the rest of the line or beyond.",
        "Add the missing closing quote."),
    rule!("E016", RuleSeverity::Error, "ERRORLEVEL comparison without an operator",
        "IF ERRORLEVEL <digits> (or IF NOT ERRORLEVEL <digits>) is written without a comparison operator, which tests \"greater than or equal to\" in a way that is easy to misread as equality.",
        "Use IF %ERRORLEVEL% EQU <n> for an exact comparison, or document the intended greater-or-equal semantics."),
    rule!("E017", RuleSeverity::Error, "Unknown percent-tilde modifier",
        "A %~ expansion uses a modifier letter outside the recognized set {f, d, p, n, x, s, a, t, z}.",
        "Remove or correct the unrecognized modifier letter."),
    rule!("E019", RuleSeverity::Error, "Percent-tilde applied to an invalid target",
        "A %~ expansion's target is neither a parameter digit (0-9) nor a FOR loop variable reference.",
        "Apply %~ modifiers only to %0-%9 or a %%variable."),
    rule!("E020", RuleSeverity::Error, "Wrong FOR-variable form for context",
        "A FOR loop variable uses the single-percent interactive form (%x) inside a batch file, or the double-percent batch form (%%x) at an interactive prompt.",
        "Use %%x inside .bat/.cmd files and %x only when typing directly at the command prompt."),
    rule!("E021", RuleSeverity::Error, "Unbalanced parentheses in SET /A expression",
        "The arithmetic expression passed to SET /A has a parenthesis that is never closed, or a close with no matching open.",
        "Balance the parentheses in the expression."),
    rule!("E022", RuleSeverity::Error, "SET /A syntax error",
        "The arithmetic expression passed to SET /A contains an unrecognized token, an operator with no operand, or two operands with nothing between them.",
        "Rewrite the expression using only recognized operators, identifiers and integer literals."),
    rule!("E023", RuleSeverity::Error, "Unescaped special character in SET /A expression",
        "The expression contains ^, &, |, << or >> outside quotes; cmd.exe interprets these itself before SET /A ever receives them.",
        "Wrap the entire expression in double quotes, e.g. SET /A \"x=1^2\"."),
    rule!("E024", RuleSeverity::Error, "Invalid percent-tilde modifier combination",
        "The modifiers a and z were combined, or the $PATH: prefix was applied to a non-digit target; both combinations are rejected by cmd.exe.",
        "Remove the conflicting modifier or change the target to a parameter digit."),
    rule!("E029", RuleSeverity::Error, "SET /A expression too complex to validate",
        "The expression nests parentheses or chains assignments far enough that static validation cannot usefully confirm correctness.",
        "Split the expression into multiple SET /A statements with intermediate variables."),
    rule!("E030", RuleSeverity::Error, "Dangling line-continuation caret",
        "The final line of the file ends in a caret, signalling continuation into a line that does not exist.",
        "Remove the trailing caret or add the continued content."),
    rule!("E031", RuleSeverity::Error, "Caret escape inside a quoted string",
        "A caret inside a double-quoted string has no escaping effect; cmd.exe treats quoted text literally, so the caret is passed through as-is.",
        "Remove the caret, or move the text it was meant to escape outside the quotes."),
    rule!("E032", RuleSeverity::Error, "Line continuation followed by a blank line",
        "A trailing caret signals continuation, but the next line is blank, so the continuation joins nothing and the caret's effect is empty.",
        "Remove the trailing caret or supply content to continue onto."),
    rule!("E033", RuleSeverity::Error, "Excessive line-continuation chain",
        "More than twenty consecutive lines end in a continuation caret, a pattern far more often the symptom of a missing terminator than an intentional long command.",
        "Break the command into several statements, or confirm every caret is intentional."),
    rule!("E034", RuleSeverity::Error, "Removed command invoked",
        "This command was removed from supported Windows releases and will fail outright rather than warn.",
        "Replace it with its supported successor; see the recommendation for the specific command."),

    // --- Warning family: likely bugs, not necessarily crashes ---------------
    rule!("W001", RuleSeverity::Warning, "Script can fall through without exiting",
        "At least one path from the first executable line can reach the last line without passing through EXIT or GOTO :EOF.",
        "Add an explicit EXIT /B at the end, or confirm the fall-through is intentional for a subroutine library."),
    rule!("W003", RuleSeverity::Warning, "CALL target could not be resolved",
        "The called script could not be located relative to the caller's directory under either the .bat or .cmd extension.",
        "Check the path and extension of the CALL target."),
    rule!("W004", RuleSeverity::Warning, "Potential infinite loop",
        "A label is followed, eventually, by an unconditional GOTO back to itself on a reachable path with no variable used in the loop being mutated in between.",
        "Confirm a loop-ending condition exists, typically a variable mutated inside the loop and tested by an IF."),
    rule!("W005", RuleSeverity::Warning, "Unquoted variable expansion that may contain spaces",
        "A %VAR% or !VAR! expansion that is not quoted and whose name suggests a path or user-controllable value may contain spaces, breaking downstream tokenization.",
        "Quote the expansion: \"%VAR%\"."),
    rule!("W006", RuleSeverity::Warning, "PATH modified without preserving the prior value",
        "SET PATH=... replaces the variable outright instead of appending to %PATH%, which drops every previously configured directory for the rest of the session.",
        "Use SET \"PATH=%PATH%;newdir\" to extend rather than replace."),
    rule!("W007", RuleSeverity::Warning, "Hardcoded absolute path",
        "A drive-rooted absolute path is hardcoded, which breaks when the script runs under a different drive letter, user profile, or installation location.",
        "Derive the path from %~dp0, an environment variable, or a configuration value instead."),
    rule!("W008", RuleSeverity::Warning, "Missing error check after a command that may fail",
        "A command capable of failing (copy, move, del, a network call) is not followed by any ERRORLEVEL or && / || check before the script continues.",
        "Check %ERRORLEVEL% or chain with && / || and handle the failure path."),
    rule!("W009", RuleSeverity::Warning, "Overly broad wildcard deletion",
        "DEL or RMDIR is applied to a bare wildcard such as *.* or *, which can remove far more than intended if the working directory is not what was assumed.",
        "Narrow the wildcard, or CD into a known directory and confirm it before deleting."),
    rule!("W010", RuleSeverity::Warning, "Redirection target not quoted",
        "A redirection target (> or >>) built from a variable is not quoted, so a value containing spaces is split into extra arguments.",
        "Quote the redirection target."),
    rule!("W011", RuleSeverity::Warning, "ECHO used for user-facing output mixed with ECHO OFF",
        "The script both disables command echoing and relies on ECHO for user-facing text, which is fine, but also pipes that text through commands that assume echoing is on.",
        "Keep ECHO OFF and verify user-facing text is never itself suppressed."),
    rule!("W012", RuleSeverity::Warning, "CHDIR/CD without pushd or a saved prior directory",
        "CD changes the working directory without first saving it via PUSHD, making it impossible to restore when the script finishes or fails partway through.",
        "Use PUSHD/POPD instead of CD so the original directory is restored automatically."),
    rule!("W013", RuleSeverity::Warning, "Duplicate label definition",
        "This label name is defined more than once in the file; GOTO and CALL always target the first definition, so the later one is unreachable as a destination.",
        "Rename or remove the duplicate label."),
    rule!("W014", RuleSeverity::Warning, "Variable read immediately after being set on the same expansion pass",
        "A variable is set and then read with %VAR% on the same block without delayed expansion enabled, so the read sees the value from before the block started.",
        "Enable SETLOCAL ENABLEDELAYEDEXPANSION and use !VAR! for the read, or move the read outside the block."),
    rule!("W015", RuleSeverity::Warning, "Command run without checking its exit code in a chain",
        "Several commands are chained with & rather than && / ||, so a failure partway through is silently ignored and later commands still run.",
        "Use && to require success before the next command, or || to branch on failure."),
    rule!("W016", RuleSeverity::Warning, "Title set without restoring on exit",
        "TITLE changes the console window title but the script never restores the previous title before exiting.",
        "Save the original title if it matters, or accept the console retains the new title after the script exits."),
    rule!("W017", RuleSeverity::Warning, "Use of GOTO for structured iteration",
        "A GOTO-based loop is used where a FOR loop would express the same iteration more directly and with fewer places for a mistake to hide.",
        "Consider replacing the GOTO loop with a FOR /L or FOR %%x in (...) loop."),
    rule!("W018", RuleSeverity::Warning, "Mixed line endings in the file",
        "The file mixes CRLF, LF and/or CR terminators; editors and the command processor can disagree about where a line ends, corrupting parsing.",
        "Normalize the file to a single consistent line-ending style."),
    rule!("W019", RuleSeverity::Warning, "SET without /P, /A, or an explicit value",
        "A bare SET VAR= clears the variable to empty, which is valid but easy to confuse with an omitted value when reading the script later.",
        "Write SET \"VAR=\" explicitly if clearing is intended, to make the intent unambiguous."),
    rule!("W020", RuleSeverity::Warning, "Unquoted assignment value containing special characters",
        "SET VAR=value is not quoted and the value contains characters cmd.exe treats specially (& | < > ^), which changes what is actually assigned.",
        "Quote the whole assignment: SET \"VAR=value\"."),
    rule!("W021", RuleSeverity::Warning, "IF comparison without quotes",
        "An IF string comparison compares unquoted expansions; if either side is empty or contains spaces the comparison's argument count changes and the script errors instead of comparing.",
        "Quote both sides of the comparison."),
    rule!("W022", RuleSeverity::Warning, "Recursive CALL without a depth guard",
        "A script CALLs itself (directly or via another script) with no counter or base case visible, risking runaway recursion.",
        "Add an explicit depth parameter and a base case that stops the recursion."),
    rule!("W023", RuleSeverity::Warning, "EXIT without /B inside a CALLed script",
        "EXIT with no /B terminates the entire cmd.exe process, including the caller, instead of returning control to it.",
        "Use EXIT /B [code] to return from a called script instead of exiting the whole process."),
    rule!("W024", RuleSeverity::Warning, "Deprecated command",
        "This command still runs but is deprecated and may be removed from a future Windows release.",
        "Migrate to the documented modern replacement for this command."),
    rule!("W025", RuleSeverity::Warning, "FOR /F usebackq missing for a quoted file list",
        "FOR /F parses a quoted string as a literal list member by default; without usebackq, a quoted path is not treated as a file name.",
        "Add usebackq to the FOR /F options when the quoted argument names a file."),

    // --- Style family: cosmetic/consistency -------------------------------
    rule!("S001", RuleSeverity::Style, "Missing @ECHO OFF near the top of the script",
        "None of the first three non-blank, non-comment lines is @ECHO OFF, so the script echoes every command it runs unless the caller suppressed it externally.",
        "Add @ECHO OFF as the first line."),
    rule!("S002", RuleSeverity::Style, "ECHO OFF without the @ prefix",
        "ECHO OFF is written without a leading @, so the ECHO OFF command itself is echoed before command echoing turns off.",
        "Prefix with @: @ECHO OFF."),
    rule!("S003", RuleSeverity::Style, "Inconsistent command casing",
        "The same command name appears in more than one casing style across the file (e.g. both ECHO and echo), which reads as inconsistent even though cmd.exe is case-insensitive.",
        "Pick one casing convention for command names and apply it throughout the file."),
    rule!("S004", RuleSeverity::Style, "Trailing whitespace",
        "The line has trailing spaces or tabs after its last visible character.",
        "Remove the trailing whitespace."),
    rule!("S005", RuleSeverity::Style, "Inconsistent line-ending style for this line",
        "This line's terminator does not match the file's dominant line-ending style.",
        "Re-save the file with a single consistent line-ending style."),
    rule!("S006", RuleSeverity::Style, "Tab character used for indentation",
        "The line is indented with a tab rather than spaces, which renders inconsistently across editors and terminals.",
        "Replace leading tabs with spaces."),
    rule!("S007", RuleSeverity::Style, "Unconventional file extension casing",
        "The script's extension is not lowercase (.BAT, .Cmd, etc.), which is valid but inconsistent with the common convention.",
        "Rename the file to use a lowercase extension."),
    rule!("S008", RuleSeverity::Style, "Inconsistent indentation width",
        "Sibling lines inside the same block use different amounts of leading whitespace.",
        "Pick one indentation width and apply it consistently within each block."),
    rule!("S009", RuleSeverity::Style, "Label not preceded by a blank line",
        "A label definition immediately follows a code line with no blank line separating them, making the block boundary harder to scan.",
        "Add a blank line before label definitions that start a new block."),
    rule!("S010", RuleSeverity::Style, "Unreferenced label",
        "This label is never the target of a GOTO or CALL anywhere in the file.",
        "Remove the label if it is dead, or confirm it is meant to be reached from outside this file."),
    rule!("S011", RuleSeverity::Style, "Line exceeds the configured maximum length",
        "The line's length in characters exceeds the configured maximum line length.",
        "Wrap the command across multiple lines using a caret continuation, or shorten it."),
    rule!("S012", RuleSeverity::Style, "Multiple statements on one line without clear separation",
        "Several commands are chained with & on a single line in a way that is visually dense and harder to scan.",
        "Split the statements across multiple lines, one command per line."),
    rule!("S013", RuleSeverity::Style, "Comment style mixes REM and ::",
        "The file uses both REM and :: as comment markers inconsistently.",
        "Pick one comment marker and use it consistently throughout the file."),
    rule!("S014", RuleSeverity::Style, "Missing blank line between logical sections",
        "Two unrelated command blocks run together with no blank line between them.",
        "Insert a blank line between logically distinct sections."),
    rule!("S015", RuleSeverity::Style, "Inconsistent capitalization of variable names",
        "The same variable name is referenced with different casing in different places.",
        "Use one consistent casing for each variable name throughout the file."),
    rule!("S016", RuleSeverity::Style, "Redundant ECHO. used for a blank line",
        "ECHO. is used to print a blank line, a historically common idiom with edge cases around redirection; ECHO( is the more robust equivalent.",
        "Prefer ECHO( over ECHO. for printing a blank line."),
    rule!("S017", RuleSeverity::Style, "Label name not descriptive",
        "The label name is a single letter or purely numeric, giving no indication of the block's purpose.",
        "Rename the label to describe what the block does."),
    rule!("S028", RuleSeverity::Style, "Redundant parentheses",
        "A parenthesized group wraps a single command or expression with no branching or grouping need, adding visual noise without changing behavior.",
        "Remove the unnecessary parentheses."),

    // --- Security family ---------------------------------------------------
    rule!("SEC001", RuleSeverity::Security, "Plaintext credential in a SET assignment",
        "A variable assignment's name or value strongly resembles a password, API key, or token stored directly in the script.",
        "Move the credential to a secure store (environment variable injected at runtime, a credential manager, or a vault) and reference it indirectly."),
    rule!("SEC002", RuleSeverity::Security, "curl/wget piped directly into a command interpreter",
        "Output of a network download is piped straight into cmd or another interpreter without ever being inspected or verified.",
        "Download to a file first, verify its checksum or signature, then execute it as a separate step."),
    rule!("SEC003", RuleSeverity::Security, "Disabling of a security feature",
        "The script disables a security control such as UAC, Windows Defender, or the firewall.",
        "Avoid disabling security controls from an automated script; if unavoidable, scope and document the reason narrowly."),
    rule!("SEC004", RuleSeverity::Security, "World-writable permission grant",
        "ICACLS or CACLS grants Everyone or Users full control over a file or directory.",
        "Grant the minimum permission needed to the specific principal that requires it."),
    rule!("SEC005", RuleSeverity::Security, "Execution of a command built from unsanitized input",
        "A command line is built by concatenating a variable sourced from user input or an argument directly into a command that is then executed.",
        "Validate or allowlist the input before using it in a command, or pass it as a properly quoted argument rather than concatenating into the command text."),
    rule!("SEC006", RuleSeverity::Security, "Insecure temp file creation",
        "A file is created in a shared temp directory using a predictable name, which another process or user could pre-create or race.",
        "Use a unique, unpredictable temp file name, e.g. incorporating %RANDOM% or a generated GUID."),
    rule!("SEC007", RuleSeverity::Security, "Execution policy or signature check bypassed",
        "A nested PowerShell invocation passes -ExecutionPolicy Bypass or disables signature verification.",
        "Avoid bypassing execution policy from an automated script; sign the script instead."),
    rule!("SEC011", RuleSeverity::Security, "Use of a cleartext network protocol for credentials",
        "ftp, telnet, or a plain-HTTP URL carrying a username/password is used where traffic is not encrypted.",
        "Use an encrypted equivalent (SFTP/FTPS, SSH, HTTPS) instead."),
    rule!("SEC012", RuleSeverity::Security, "Registry modification affecting security policy",
        "REG ADD/REG DELETE targets a registry key under a security-policy hive (UAC, Defender, firewall, Group Policy).",
        "Apply the policy change via Group Policy or a signed deployment channel instead of an ad hoc script."),
    rule!("SEC013", RuleSeverity::Security, "Service disabled or deleted that is commonly security-relevant",
        "SC STOP/DELETE or NET STOP targets a service whose name matches a known security product or Windows protection service.",
        "Confirm this is intentional; disabling security services from a script is a common malware technique and should be reviewed."),
    rule!("SEC014", RuleSeverity::Security, "Scheduled task created for persistence",
        "SCHTASKS /CREATE registers a task that runs at logon or on a recurring schedule, a common persistence mechanism.",
        "Confirm the task is expected, document its purpose, and scope its trigger as narrowly as possible."),
    rule!("SEC015", RuleSeverity::Security, "Autorun registry key modified",
        "A Run/RunOnce registry key is modified, which causes a program to launch automatically at logon.",
        "Use a documented installer mechanism instead of writing Run keys directly from a script."),
    rule!("SEC016", RuleSeverity::Security, "Obfuscated or encoded command payload",
        "A base64-like blob or heavily encoded string is decoded and executed, a pattern associated with hiding payload content from casual review.",
        "Keep executed commands in plain, reviewable text."),
    rule!("SEC017", RuleSeverity::Security, "Direct write to a system-protected path",
        "A file is written directly under %WINDIR%\\System32 or another protected system path outside a documented installer step.",
        "Write application files under a location the application owns, not directly into system directories."),
    rule!("SEC018", RuleSeverity::Security, "Certificate validation disabled in a nested call",
        "A nested PowerShell or curl invocation disables TLS/SSL certificate validation.",
        "Keep certificate validation enabled; fix the underlying trust issue instead of disabling the check."),
    rule!("SEC019", RuleSeverity::Security, "Privilege escalation via runas without justification",
        "RUNAS or an elevation request appears with no accompanying explanation of why elevated rights are required.",
        "Document why elevation is required, and scope the elevated portion to the minimum necessary commands."),
    rule!("SEC020", RuleSeverity::Security, "Firewall rule opens a broad inbound port",
        "netsh advfirewall adds an inbound allow rule with no scoping to a specific remote address or profile.",
        "Scope the rule to the specific address, profile, and port actually required."),
    rule!("SEC021", RuleSeverity::Security, "Event log cleared",
        "wevtutil cl or a similar command clears an event log, removing an audit trail.",
        "Avoid clearing event logs from automated scripts; export or archive instead if log rotation is the goal."),
    rule!("SEC022", RuleSeverity::Security, "Shadow copy or backup catalog deleted",
        "vssadmin or wbadmin deletes shadow copies or the backup catalog, a known step in ransomware playbooks.",
        "Confirm this is an intended maintenance operation and restrict who can run this script."),
    rule!("SEC023", RuleSeverity::Security, "WMI used to spawn a remote process",
        "wmic process call create targets a remote computer, a common lateral-movement technique.",
        "Use a managed remote-execution channel (e.g. PsExec with logging, or a configuration-management tool) instead."),
    rule!("SEC024", RuleSeverity::Security, "Hardcoded IP address used as a command-and-control-style endpoint",
        "A raw IP literal (rather than a configured hostname) is used as a download or callback endpoint.",
        "Use a configurable, documented hostname rather than a hardcoded IP literal."),

    // --- Performance family --------------------------------------------------
    rule!("P001", RuleSeverity::Performance, "Repeated external process invocation inside a loop",
        "A command that spawns a new process is called once per loop iteration where a single batched invocation would suffice.",
        "Move the external call outside the loop, or batch its input so it runs once."),
    rule!("P002", RuleSeverity::Performance, "Duplicated block of code",
        "Two non-overlapping runs of at least three identical non-blank, non-comment lines appear in the file.",
        "Factor the duplicated block into a CALLed subroutine."),
    rule!("P003", RuleSeverity::Performance, "SETLOCAL with no subsequent SET",
        "SETLOCAL establishes a new variable scope but no SET command ever runs inside it, so the scope change has no effect.",
        "Remove the unnecessary SETLOCAL, or add the SET commands it was meant to scope."),
    rule!("P004", RuleSeverity::Performance, "Delayed expansion enabled but never used",
        "SETLOCAL ENABLEDELAYEDEXPANSION is set but no !VAR! reference appears in its scope.",
        "Remove ENABLEDELAYEDEXPANSION if delayed expansion is not needed."),
    rule!("P005", RuleSeverity::Performance, "ENDLOCAL with no matching SETLOCAL",
        "ENDLOCAL appears with no SETLOCAL open at that point in the file, which has no effect beyond the nearest enclosing scope (if any) and signals a miscounted block.",
        "Remove the stray ENDLOCAL, or add the SETLOCAL it was meant to close."),
    rule!("P006", RuleSeverity::Performance, "SETLOCAL left open at script exit",
        "A SETLOCAL scope is still open when the script reaches EXIT, relying on implicit cleanup rather than an explicit ENDLOCAL.",
        "Add ENDLOCAL before EXIT to close the scope explicitly."),
    rule!("P007", RuleSeverity::Performance, "Large file read line-by-line via FOR /F instead of batched",
        "FOR /F iterates a large file one line at a time with per-iteration overhead where a batched tool (FINDSTR, SORT) would process it in one pass.",
        "Use a batched text tool for bulk processing instead of a per-line FOR /F loop where possible."),
    rule!("P008", RuleSeverity::Performance, "Delayed expansion enabled for the whole script when only one block needs it",
        "ENABLEDELAYEDEXPANSION is set once for the entire script though only a small, identifiable block actually uses !VAR! syntax.",
        "Scope ENABLEDELAYEDEXPANSION to just the SETLOCAL/ENDLOCAL block that needs it."),
    rule!("P009", RuleSeverity::Performance, "Redundant CALL to a label in the same file",
        "CALL :label is used to invoke a block in the same script where a plain GOTO with an explicit return label would avoid the CALL/return overhead.",
        "Consider whether the overhead of CALL's sub-scope is needed, or whether GOTO suffices."),
    rule!("P010", RuleSeverity::Performance, "Repeated identical FINDSTR/grep-style scan",
        "The same search pattern is run against the same target more than once in the file where the result could be captured once and reused.",
        "Capture the result of the first scan into a variable and reuse it."),
    rule!("P024", RuleSeverity::Performance, "SETLOCAL immediately followed by ENDLOCAL",
        "ENDLOCAL appears on the very next non-blank line after SETLOCAL, so the scope exists for zero effective commands.",
        "Remove both the SETLOCAL and the ENDLOCAL, since the scope serves no purpose."),
    rule!("P025", RuleSeverity::Performance, "Unnecessary use of CALL for a non-label target",
        "CALL is used to invoke an external command that does not require CALL's semantics (only .bat/.cmd targets and in-file labels do).",
        "Invoke the external command directly without CALL."),
    rule!("P026", RuleSeverity::Performance, "Delayed expansion enabled in a nested scope that inherits it already",
        "SETLOCAL ENABLEDELAYEDEXPANSION is issued again inside a scope that already has delayed expansion enabled from an outer SETLOCAL.",
        "Remove the redundant ENABLEDELAYEDEXPANSION; it is already in effect from the enclosing scope."),

    // --- Generic pattern-table entries, data-driven by PatternRule ---------
    rule!("S018", RuleSeverity::Style, "Inconsistent spacing around operators",
        "Comparison or assignment operators are spaced inconsistently across the file (e.g. `x=1` next to `y = 2`).",
        "Pick one spacing convention around operators and apply it throughout."),
    rule!("S019", RuleSeverity::Style, "Command invoked with an unnecessary full path",
        "A command on the system PATH is invoked via its full path for no apparent reason, adding noise and coupling the script to a specific install location.",
        "Invoke the command by name unless the full path is required to disambiguate."),
    rule!("S020", RuleSeverity::Style, "Inconsistent use of /? usage banners",
        "Some subroutines print a usage banner on bad input and others do not, which is inconsistent for callers of the script.",
        "Decide whether the script should print usage on bad input and apply that decision consistently."),
    rule!("S021", RuleSeverity::Style, "PAUSE left in a script intended for unattended use",
        "PAUSE blocks execution waiting for a keypress, which stalls the script indefinitely when run unattended (from a scheduled task or CI job).",
        "Remove PAUSE, or guard it behind a flag that is off for unattended runs."),
    rule!("S022", RuleSeverity::Style, "CLS used at the start of a script",
        "CLS clears the console, discarding any output a caller may have wanted to see from before this script ran.",
        "Avoid CLS in scripts meant to be composed with other output; let the caller manage the console."),
    rule!("S023", RuleSeverity::Style, "Inconsistent quoting style for string literals",
        "Some string arguments in the file are quoted and others, structurally similar, are not.",
        "Quote all string arguments consistently, especially any that could contain spaces."),
    rule!("S024", RuleSeverity::Style, "Magic number used without explanation",
        "A numeric literal appears in a comparison or arithmetic expression with no comment explaining what it represents.",
        "Assign the number to a descriptively named variable, or add a comment explaining its meaning."),
    rule!("S025", RuleSeverity::Style, "Commented-out code left in the script",
        "A REM or :: line contains what looks like a command rather than prose, suggesting dead code left behind rather than an explanatory comment.",
        "Remove commented-out code once it is no longer needed; version control preserves the history."),
    rule!("S026", RuleSeverity::Style, "Inconsistent use of /B with EXIT",
        "Some EXIT statements in the file use /B and others do not, with no apparent reason for the difference.",
        "Use EXIT /B consistently unless terminating the entire cmd.exe process is specifically intended."),
    rule!("S027", RuleSeverity::Style, "Verbose boolean comparison",
        "A comparison such as `IF \"%FLAG%\"==\"true\"` is used where the variable could be tested more directly.",
        "Consider testing the variable's definedness directly, e.g. `IF DEFINED FLAG`, if that captures the real intent."),
    rule!("S029", RuleSeverity::Style, "Label casing inconsistent with its references",
        "A label is defined in one casing and referenced with different casing elsewhere; both resolve identically but read as inconsistent.",
        "Use the same casing for a label's definition and all of its references."),
    rule!("S030", RuleSeverity::Style, "Script lacks a header comment",
        "The file has no leading comment describing its purpose, expected arguments, or author.",
        "Add a brief header comment summarizing what the script does and how to invoke it."),

    rule!("W026", RuleSeverity::Warning, "IF without an ELSE where one branch silently does nothing",
        "A conditional handles the true branch but the false branch is left implicit, which is sometimes intentional but easy to overlook during review.",
        "Add an explicit ELSE branch, or a comment noting the false case is intentionally a no-op."),
    rule!("W027", RuleSeverity::Warning, "Environment variable set but never read",
        "A variable is assigned a value with SET but no later line in the file reads it.",
        "Remove the unused assignment, or confirm it is read by a CALLed script."),
    rule!("W028", RuleSeverity::Warning, "Inconsistent use of quotes around a path with spaces",
        "The same path is sometimes quoted and sometimes not across different invocations in the file.",
        "Quote every occurrence of a path that may contain spaces."),
    rule!("W029", RuleSeverity::Warning, "FOR /R without a specified root",
        "FOR /R recurses from the current directory by default; omitting an explicit root makes the scope of the recursion depend on the caller's working directory.",
        "Specify an explicit root directory for FOR /R."),
    rule!("W030", RuleSeverity::Warning, "XCOPY/ROBOCOPY without an overwrite or confirmation policy",
        "The copy command's behavior on an existing destination file depends on an interactive prompt that an unattended run cannot answer.",
        "Pass an explicit overwrite flag (e.g. /Y) so behavior does not depend on an interactive prompt."),
    rule!("W031", RuleSeverity::Warning, "Network drive mapped without /PERSISTENT:NO",
        "NET USE maps a drive letter without specifying persistence, defaulting to a value that depends on the user's prior settings.",
        "Specify /PERSISTENT:YES or /PERSISTENT:NO explicitly."),

    rule!("SEC008", RuleSeverity::Security, "Reserved", "Reserved for a future rule; no current check uses this code.", "N/A — this code is intentionally unassigned."),
    rule!("SEC009", RuleSeverity::Security, "Reserved", "Reserved for a future rule; no current check uses this code.", "N/A — this code is intentionally unassigned."),
    rule!("SEC010", RuleSeverity::Security, "Reserved", "Reserved for a future rule; no current check uses this code.", "N/A — this code is intentionally unassigned."),

    rule!("P011", RuleSeverity::Performance, "Recomputation of a constant value inside a loop",
        "An expression with no dependency on the loop variable is recomputed on every iteration instead of once before the loop.",
        "Hoist the loop-invariant computation above the loop."),
    rule!("P012", RuleSeverity::Performance, "Synchronous ping used as a sleep substitute",
        "PING 127.0.0.1 -n N is used purely to introduce a delay, which is fragile (depends on loopback networking) compared to a dedicated wait.",
        "Use TIMEOUT /T N instead of PING as a delay mechanism."),
    rule!("P013", RuleSeverity::Performance, "Directory enumerated repeatedly instead of cached",
        "The same DIR or FOR /D enumeration of a directory is performed more than once in the file with no change to the directory in between.",
        "Enumerate once, store the result, and reuse it."),
    rule!("P014", RuleSeverity::Performance, "Unbuffered per-line console output inside a large loop",
        "ECHO is called once per iteration of a loop that may run many times, and console output is comparatively slow relative to batching it.",
        "Accumulate output and write it in fewer, larger operations where practical."),
    rule!("P015", RuleSeverity::Performance, "Redundant ECHO OFF after it is already in effect",
        "ECHO OFF or @ECHO OFF is issued again later in the script when command echoing was already off from the top of the file.",
        "Remove the redundant ECHO OFF."),

    rule!("SEC025", RuleSeverity::Security, "Symbolic link or junction created without validating the target",
        "MKLINK creates a link to a path built from a variable with no validation that the target is the expected, trusted location.",
        "Validate the link target before creating it, especially when any part of the path comes from outside the script."),
    rule!("SEC026", RuleSeverity::Security, "Environment variable expansion used to build a command run with elevated rights",
        "A command executed via RUNAS or from an elevated context interpolates an environment variable directly into the command line.",
        "Validate or allowlist the variable's value before using it in an elevated command."),

    rule!("W032", RuleSeverity::Warning, "SETLOCAL without ENABLEEXTENSIONS where extensions are relied upon",
        "The script uses a command-extension-only construct (such as %~dp0) but never explicitly enables extensions, relying on the system default.",
        "Add SETLOCAL ENABLEEXTENSIONS explicitly so the script does not depend on the system's default configuration."),
    rule!("W033", RuleSeverity::Warning, "Numeric comparison using string equality operators",
        "Two values that are both clearly intended as numbers are compared with == instead of a numeric operator (EQU, GTR, ...), which compares them as text.",
        "Use IF %A% EQU %B% for a numeric comparison instead of ==."),
    rule!("W034", RuleSeverity::Warning, "Assignment inside an IF block without delayed expansion",
        "A variable is set inside a parenthesized IF block and then read later in the same block with %VAR%, which sees the pre-block value because expansion happens at parse time.",
        "Enable delayed expansion and read the variable with !VAR! inside the block."),

    rule!("P016", RuleSeverity::Performance, "TYPE used to read a file that is only checked for existence",
        "TYPE is used to dump a file's contents purely to test whether the command succeeds, discarding the output.",
        "Use IF EXIST to test for existence instead of reading the whole file."),
    rule!("P017", RuleSeverity::Performance, "Nested loops both iterating the same large set",
        "Two nested FOR loops both range over a large, identical or overlapping set, giving quadratic work where a single pass might suffice.",
        "Confirm the nested iteration is necessary; consider restructuring to a single pass with an auxiliary lookup."),
    rule!("P018", RuleSeverity::Performance, "Unnecessary SETLOCAL around a single read-only command",
        "SETLOCAL wraps a single command that reads but never sets any variable, so the scope provides no isolation benefit.",
        "Remove the SETLOCAL/ENDLOCAL pair around the read-only command."),

    rule!("W002", RuleSeverity::Warning, "EXIT /B used outside any CALLed context at top level",
        "EXIT /B at the top level of a script invoked directly (not via CALL) returns to the parent cmd.exe shell rather than simply ending the batch file, which can close an interactive window unexpectedly.",
        "Use plain EXIT at the top level of a script meant to be double-clicked or run directly, reserving EXIT /B for CALLed subroutines."),

    rule!("W035", RuleSeverity::Warning, "Shutdown or restart issued without a confirmation guard",
        "SHUTDOWN is invoked with no preceding confirmation or dry-run flag, and no visible check guarding when it executes.",
        "Guard the shutdown behind an explicit confirmation or a dry-run flag before it ships."),
    rule!("W036", RuleSeverity::Warning, "TASKKILL with an overly broad filter",
        "TASKKILL /IM targets a very generic image name (e.g. *.exe) that could match far more processes than intended.",
        "Narrow the filter to the specific process name or PID actually intended."),
    rule!("W037", RuleSeverity::Warning, "WSCRIPT/CSCRIPT invoked without specifying the host explicitly",
        "A .vbs or .js file is run via its file association rather than explicitly through cscript or wscript, leaving the host engine dependent on system defaults.",
        "Invoke cscript.exe or wscript.exe explicitly rather than relying on the file association."),
    rule!("W038", RuleSeverity::Warning, "Variable name shadows a well-known environment variable",
        "A SET assignment reuses the name of a well-known environment variable (e.g. PATH, TEMP) for an unrelated purpose, risking confusing downstream commands.",
        "Choose a variable name that does not collide with a well-known environment variable."),

    rule!("S031", RuleSeverity::Style, "Label defined with a redundant trailing colon",
        "A label is written as `::name::` or `:name:`, which defines a label whose name includes the trailing colon rather than the intended bare name.",
        "Define the label with a single leading colon and no trailing colon: `:name`."),
    rule!("S032", RuleSeverity::Style, "Excessive consecutive blank lines",
        "More than two consecutive blank lines appear between sections.",
        "Collapse the run of blank lines to at most one or two."),
    rule!("S033", RuleSeverity::Style, "No trailing newline at end of file",
        "The file's last line has no terminating line ending.",
        "Add a trailing newline at the end of the file."),
    rule!("S034", RuleSeverity::Style, "SETLOCAL/ENDLOCAL keywords in inconsistent casing",
        "SETLOCAL or ENDLOCAL appears in more than one casing style across the file.",
        "Pick one casing for SETLOCAL/ENDLOCAL and use it consistently."),

    rule!("P019", RuleSeverity::Performance, "Back-to-back SETLOCAL/ENDLOCAL pairs that could be merged",
        "Two adjacent SETLOCAL/ENDLOCAL blocks with nothing but a command or two between them could be merged into a single scope.",
        "Merge adjacent scopes that serve no isolation purpose between them."),
    rule!("P020", RuleSeverity::Performance, "Same FINDSTR pattern compiled fresh on every loop iteration",
        "A FINDSTR invocation with a non-trivial pattern runs once per loop iteration against a target that does not change between iterations.",
        "Run the search once outside the loop and reuse the captured result."),
    rule!("P021", RuleSeverity::Performance, "XCOPY used where ROBOCOPY would scale better",
        "XCOPY copies a large or deep directory tree where ROBOCOPY's multithreaded, resumable copy would perform substantially better.",
        "Use ROBOCOPY for large or deep directory copies."),
    rule!("P022", RuleSeverity::Performance, "Network call repeated inside a loop with no caching",
        "A command that reaches the network (ping, nslookup, a web request) runs once per loop iteration against the same target.",
        "Cache the network result outside the loop if the target does not change per iteration."),
    rule!("P023", RuleSeverity::Performance, "Excessive SETLOCAL nesting depth",
        "More SETLOCAL scopes are nested at once than is typical, each carrying its own environment-snapshot overhead.",
        "Flatten the nesting where separate scopes are not actually required."),

    rule!("SEC027", RuleSeverity::Security, "Plain HTTP used to fetch an update or installer",
        "A download URL uses http:// rather than https:// for content that will subsequently be executed or installed.",
        "Use an https:// URL for anything that will be executed or installed."),
    rule!("SEC028", RuleSeverity::Security, "Account created with a blank or well-known default password",
        "NET USER creates or modifies an account with no password or a widely known default value.",
        "Require a strong, unique password whenever an account is created or modified by script."),
    rule!("SEC029", RuleSeverity::Security, "Audit policy disabled",
        "AUDITPOL disables a security auditing category, reducing the audit trail available after the fact.",
        "Avoid disabling audit categories from automated scripts; review the need with the security team."),
    rule!("SEC030", RuleSeverity::Security, "Antivirus exclusion added for a non-standard path",
        "An exclusion is added to Windows Defender (or another AV product) for a path outside the standard, well-documented install locations.",
        "Scope AV exclusions as narrowly as possible and document why each one exists."),
];

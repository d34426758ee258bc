//! Generation of the shell text that runs on the remote host.
//!
//! Two scripts are produced. The outer bootstrap is the remote command itself:
//! it sweeps stale sandboxes, arms the cleanup trap, creates the sandbox,
//! decodes every payload into it and finally `exec`s an interactive bash.
//! The sourcing fragment is that bash's rcfile: it recreates login-shell
//! behaviour and then sources the user's `.sshrc`.
//!
//! Nothing here touches the filesystem; both scripts are plain strings.

use crate::config::PRIMARY_FILE_NAME;
use crate::encoding::EncodedBundle;

/// Remote variable naming the sandbox directory.
pub const SANDBOX_ENV: &str = "SSHHOME";

/// Remote variable naming the directory removed by the exit trap.
pub const CLEANUP_ENV: &str = "SSHRCCLEANUP";

/// Name of the decoded sourcing fragment inside the sandbox.
pub const FRAGMENT_FILE_NAME: &str = "sshrc.bashrc";

/// File recording the pid of the shell that owns a sandbox.
pub const OWNER_PID_FILE_NAME: &str = ".pid";

/// Marker between the user name and the random suffix of sandbox names.
pub const SANDBOX_MARKER: &str = "sshrc";

/// Build the rcfile sourced by the interactive remote shell.
///
/// Order: re-arm the cleanup trap (`exec` dropped the outer one), print the
/// login banner unless `~/.hushlogin` exists, source `/etc/profile` and the
/// first readable of `.bash_profile`, `.bash_login`, `.profile`, put the
/// sandbox on `PATH`, then source the primary file.
pub fn sourcing_fragment() -> String {
    let mut script = String::new();

    script.push_str(&cleanup_trap());
    script.push_str("trap exit HUP\n");

    script.push_str(
        r#"if [ ! -e "$HOME/.hushlogin" ]; then
    if [ -r /etc/motd ]; then cat /etc/motd; fi
    if [ -d /etc/update-motd.d ]; then run-parts /etc/update-motd.d/ 2>/dev/null; fi
    last -F "$USER" 2>/dev/null | grep -v 'still logged in' | head -n1 | awk '{print "Last login:",$4,$5,$6,$7,$8,"from",$3;}'
fi
if [ -r /etc/profile ]; then . /etc/profile; fi
if [ -r "$HOME/.bash_profile" ]; then . "$HOME/.bash_profile"
elif [ -r "$HOME/.bash_login" ]; then . "$HOME/.bash_login"
elif [ -r "$HOME/.profile" ]; then . "$HOME/.profile"
fi
"#,
    );

    script.push_str(&format!("export PATH=\"$PATH:${SANDBOX_ENV}\"\n"));
    script.push_str(&format!(
        "if [ -r \"${SANDBOX_ENV}/{PRIMARY_FILE_NAME}\" ]; then . \"${SANDBOX_ENV}/{PRIMARY_FILE_NAME}\"; fi\n"
    ));

    script
}

/// Build the remote command that materializes `bundle` in a fresh sandbox.
///
/// The auxiliary archive step is left out entirely when its payload is
/// empty. Extraction errors are discarded so a damaged archive never blocks
/// the login.
pub fn outer_bootstrap(bundle: &EncodedBundle) -> String {
    let mut script = String::new();

    // Sweep sandboxes whose owning shell is gone
    script.push_str(&format!(
        r#"sshrc_tmp="${{TMPDIR:-/tmp}}"
sshrc_prefix=".$(whoami).{SANDBOX_MARKER}."
for sshrc_stale in "$sshrc_tmp/$sshrc_prefix"*; do
    [ -d "$sshrc_stale" ] || continue
    [ "$sshrc_stale" != "${SANDBOX_ENV}" ] || continue
    sshrc_owner=$(cat "$sshrc_stale/{OWNER_PID_FILE_NAME}" 2>/dev/null)
    if [ -z "$sshrc_owner" ] || ! kill -0 "$sshrc_owner" 2>/dev/null; then rm -rf "$sshrc_stale"; fi
done
"#
    ));

    script.push_str(&cleanup_trap());
    script.push_str("trap exit HUP INT TERM\n");
    script.push_str(
        r#"printf '\033]0;%s\007' "$(hostname -s 2>/dev/null)" 2>/dev/null > /dev/tty
"#,
    );

    script.push_str(&format!(
        r#"{SANDBOX_ENV}=$(mktemp -d "$sshrc_tmp/${{sshrc_prefix}}XXXXXX") || exit 1
export {SANDBOX_ENV}
export {CLEANUP_ENV}="${SANDBOX_ENV}"
"#
    ));
    script.push_str(&record_owner());

    if !bundle.auxiliary.is_empty() {
        script.push_str(&format!(
            "echo '{}' | base64 --decode | tar mxzf - -C \"${SANDBOX_ENV}\" 2>/dev/null\n",
            bundle.auxiliary.text
        ));
    }
    script.push_str(&decode_into(&bundle.primary.text, PRIMARY_FILE_NAME));
    script.push_str(&decode_into(&bundle.bootstrap.text, FRAGMENT_FILE_NAME));
    // Archive content must not replace the owner record
    script.push_str(&record_owner());

    script.push_str(&format!(
        "exec bash --rcfile \"${SANDBOX_ENV}/{FRAGMENT_FILE_NAME}\" -i\n"
    ));

    script
}

/// Exit trap removing the directory named by the cleanup variable.
///
/// Single quotes defer expansion to exit time, so the trap can be armed
/// before the sandbox exists.
fn cleanup_trap() -> String {
    format!("trap '[ -n \"${CLEANUP_ENV}\" ] && rm -rf \"${CLEANUP_ENV}\"' EXIT\n")
}

fn record_owner() -> String {
    format!("echo $$ > \"${SANDBOX_ENV}/{OWNER_PID_FILE_NAME}\"\n")
}

fn decode_into(text: &str, file_name: &str) -> String {
    format!("echo '{text}' | base64 --decode > \"${SANDBOX_ENV}/{file_name}\"\n")
}

use git_version::git_version;
use target_info::Target;

lazy_static::lazy_static! {
    /// `VERSION` without the client prefix, used by `--version`.
    pub static ref SHORT_VERSION: String = VERSION.replace("BalancerOps/", "");
}

/// Returns the current version of this build of the ops tooling.
///
/// A plus-sign (`+`) is appended to the git commit if the tree is dirty.
/// Commit hash is omitted if the sources don't include git information.
///
/// ## Example
///
/// `BalancerOps/v0.1.0-67da032+`
pub const VERSION: &str = git_version!(
    args = [
        "--always",
        "--dirty=+",
        "--abbrev=7",
        // NOTE: using --match instead of --exclude for compatibility with old Git
        "--match=thiswillnevermatchlol"
    ],
    prefix = "BalancerOps/v0.1.0-",
    fallback = "BalancerOps/v0.1.0"
);

/// Returns `VERSION` with platform information appended to the end.
///
/// Logged at start-up so bug reports can name the build that produced a payload.
///
/// ## Example
///
/// `BalancerOps/v0.1.0-67da032+/x86_64-linux`
pub fn version_with_platform() -> String {
    format!("{}/{}-{}", VERSION, Target::arch(), Target::os())
}

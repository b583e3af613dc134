//! Defaults, environment variable names, and build-script fragments.

/// Application name, also the default image repository.
pub const APP_NAME: &str = "linux-exec";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "linux-exec";

/// Default prefix stripped from symlink names before use as a command.
pub const DEFAULT_COMMAND_PREFIX: &str = "le-";

/// Default memory limit passed to the engine's `-m` flag.
pub const DEFAULT_MEMORY_LIMIT: &str = "1g";

/// Default container engine executable.
pub const DEFAULT_ENGINE_COMMAND: &str = "docker";

/// Default repository namespace for built images.
pub const DEFAULT_IMAGE_REPOSITORY: &str = APP_NAME;

/// Overrides [`DEFAULT_COMMAND_PREFIX`].
pub const ENV_PREFIX: &str = "LE_PREFIX";
/// Overrides [`DEFAULT_MEMORY_LIMIT`].
pub const ENV_MEMORY: &str = "LE_MEM";
/// Overrides [`DEFAULT_ENGINE_COMMAND`].
pub const ENV_ENGINE_COMMAND: &str = "LE_DOCKERCMD";
/// Space-separated package list.
pub const ENV_PACKAGES: &str = "LE_PACKAGES";
/// Overrides the working directory (defaults to the current directory).
pub const ENV_WORKING_DIRECTORY: &str = "LE_CWD";
/// Overrides [`DEFAULT_IMAGE_REPOSITORY`].
pub const ENV_REPOSITORY: &str = "LE_REPO";
/// Colon-separated list of extra bind mounts.
pub const ENV_MOUNTS: &str = "LE_MOUNTS";

/// Separator used by [`ENV_MOUNTS`].
pub const MOUNT_SEPARATOR: char = ':';

/// Base image every build starts from.
pub const BASE_IMAGE: &str = "archlinux";

/// System update step run once before any package install.
pub const UPDATE_COMMAND: &str = "pacman --noconfirm -Syu";

/// Install command; the package name is appended.
pub const INSTALL_COMMAND: &str = "pacman --noconfirm -S";

/// Image label key recording the literal package string.
pub const PACKAGES_LABEL: &str = "packages";

/// Go template making `image ls` print one `repository:tag` per line.
pub const IMAGE_LIST_FORMAT: &str = "{{.Repository}}:{{.Tag}}";

/// Shell used to interpret the joined command inside the container.
pub const CONTAINER_SHELL: &str = "sh";

/// SHA-256 digest length in hex characters.
pub const SHA256_HEX_LENGTH: usize = 64;

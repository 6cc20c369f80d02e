//! Method table of the capability bridge.

/// Every operation content may invoke on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    WorkspaceList,
    WorkspaceDelete,
    OpenLoadDbFileDialog,
    OpenSaveDbFileDialog,
    OnThemeChange,
    OnSidebarVisibilityChange,
    OnWorkspaceChange,
    OpenDbFolder,
    GetGoogleOauthCode,
    UpdateEnv,
}

/// A method name that is not part of the bridge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown capability: {0}")]
pub struct UnknownCapability(pub String);

impl Capability {
    pub const ALL: [Capability; 10] = [
        Self::WorkspaceList,
        Self::WorkspaceDelete,
        Self::OpenLoadDbFileDialog,
        Self::OpenSaveDbFileDialog,
        Self::OnThemeChange,
        Self::OnSidebarVisibilityChange,
        Self::OnWorkspaceChange,
        Self::OpenDbFolder,
        Self::GetGoogleOauthCode,
        Self::UpdateEnv,
    ];

    /// Wire name, as called from content (`window.apis.<name>`).
    pub fn method_name(self) -> &'static str {
        match self {
            Self::WorkspaceList => "workspace.list",
            Self::WorkspaceDelete => "workspace.delete",
            Self::OpenLoadDbFileDialog => "openLoadDBFileDialog",
            Self::OpenSaveDbFileDialog => "openSaveDBFileDialog",
            Self::OnThemeChange => "onThemeChange",
            Self::OnSidebarVisibilityChange => "onSidebarVisibilityChange",
            Self::OnWorkspaceChange => "onWorkspaceChange",
            Self::OpenDbFolder => "openDBFolder",
            Self::GetGoogleOauthCode => "getGoogleOauthCode",
            Self::UpdateEnv => "updateEnv",
        }
    }

    /// Exact, case-sensitive lookup by wire name.
    pub fn from_method(method: &str) -> Result<Self, UnknownCapability> {
        Self::ALL
            .into_iter()
            .find(|c| c.method_name() == method)
            .ok_or_else(|| UnknownCapability(method.to_owned()))
    }

    /// Notifications whose caller does not wait for a meaningful result.
    pub fn is_one_way(self) -> bool {
        matches!(
            self,
            Self::OnThemeChange
                | Self::OnSidebarVisibilityChange
                | Self::OnWorkspaceChange
                | Self::UpdateEnv
        )
    }

    /// Whether callers get a response frame at all. The `on*` notifications
    /// are acknowledged with `null`; `updateEnv` is sent as a notify frame.
    pub fn expects_reply(self) -> bool {
        !matches!(self, Self::UpdateEnv)
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.method_name())
    }
}

// =============================================================================
// TESTS
// =============================================================================

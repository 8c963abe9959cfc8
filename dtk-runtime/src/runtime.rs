//! # The Runtime Coordinator
//!
//! [Runtime] owns what is active right now (theme, dark-mode flag, tenant)
//! and is the facade through which callers resolve tokens and fetch compiled
//! stylesheets.
//!
//! ## Locking
//!
//! State transitions are serialized by a switch lock that is held across the
//! provider's load and compile calls. Readers never take it, so they keep
//! reading the previous theme while a new one loads. The swap itself happens
//! under the state write lock together with the cache invalidation, and
//! readers hold the state read lock for the whole of a resolution.
//!
//! ## Tenants
//!
//! A tenant configured with [Runtime::configure_tenant] has its policy
//! checked before every load, and its overrides applied to the loaded
//! document before compilation. Observers added with [Runtime::add_observer]
//! hear about each committed switch and dark-mode toggle.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use dtk_runtime::{Runtime, RuntimeConfig};
//! use dtk_theme::{InMemoryThemeProvider, Theme};
//!
//! let provider = Arc::new(InMemoryThemeProvider::new());
//! provider.register(Theme::from_json(r##"{
//!     "id": "default",
//!     "name": "Default",
//!     "tokens": {
//!         "primitives": { "colors": { "blue-500": "#3b82f6" } },
//!         "semantic": { "colors": { "interactive": { "primary": "primitives.colors.blue-500" } } }
//!     }
//! }"##).unwrap());
//!
//! let runtime = Runtime::new(provider, RuntimeConfig::default());
//! runtime.set_theme("default").unwrap();
//!
//! assert_eq!(runtime.resolve_token("colors.interactive.primary").unwrap(), "#3b82f6");
//! assert!(runtime.theme_css().unwrap().contains("--color-blue-500: #3b82f6;"));
//! ```

use std::collections::HashMap;
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak,
};
use std::thread::{self, JoinHandle};
use std::time::SystemTime;

use dtk_theme::{class_name, css_variable_name, Theme, ThemeKey, ThemeProvider, TokenReference};
use indexmap::IndexMap;
use serde::Serialize;

use crate::cache::RuntimeCache;
use crate::compile::CompiledTheme;
use crate::config::RuntimeConfig;
use crate::error::{RuntimeError, RuntimeResult};
use crate::events::{ThemeChangeEvent, ThemeChangeKind, ThemeObserver};
use crate::resolver::{ResolveScope, ResolvedToken, TokenInfo, TokenResolver};
use crate::tenant::TenantConfig;
use crate::validator::{ThemeValidator, ValidationReport, ValidatorConfig};

/// Buffered change events per subscriber.
#[cfg(feature = "tokio-runner")]
const EVENT_CAPACITY: usize = 16;

/// A runtime shared between threads.
pub type SharedRuntime = Arc<Runtime>;

/// Public metadata about a theme. The token tree is not included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeInfo {
    /// Theme id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Version string.
    pub version: String,
    /// For the active theme, whether dark mode is on. For listed themes,
    /// whether the theme supports it.
    pub dark_mode: bool,
    /// Tenant the theme was loaded for.
    pub tenant_id: Option<String>,
}

impl ThemeInfo {
    fn from_theme(theme: &Theme, dark_mode: bool, tenant_id: Option<String>) -> Self {
        Self {
            id: theme.id.clone(),
            name: theme.name.clone(),
            description: theme.description.clone(),
            version: theme.version.clone(),
            dark_mode,
            tenant_id,
        }
    }
}

/// Outcome of preloading the configured themes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadReport {
    /// Ids that loaded and compiled.
    pub loaded: Vec<String>,
    /// Ids that failed, with the error message.
    pub failed: Vec<(String, String)>,
}

#[derive(Debug, Default)]
struct ActiveState {
    theme: Option<Arc<Theme>>,
    key: Option<ThemeKey>,
    dark_mode: bool,
    tenant: Option<String>,
}

impl ActiveState {
    /// The tenant the active theme was loaded for.
    fn loaded_tenant(&self) -> Option<&str> {
        self.key.as_ref().and_then(|key| key.tenant.as_deref())
    }

    fn event(&self, kind: ThemeChangeKind, previous_theme: Option<String>) -> ThemeChangeEvent {
        ThemeChangeEvent {
            kind,
            previous_theme,
            new_theme: self.theme.as_ref().map(|theme| theme.id.clone()),
            dark_mode: self.dark_mode,
            tenant_id: self.loaded_tenant().map(str::to_string),
            timestamp: SystemTime::now(),
        }
    }
}

#[derive(Debug, Default)]
enum Preload {
    #[default]
    Idle,
    Running(JoinHandle<PreloadReport>),
    Done(PreloadReport),
}

/// The runtime coordinator.
pub struct Runtime {
    provider: Arc<dyn ThemeProvider>,
    config: RuntimeConfig,
    cache: Arc<RuntimeCache>,
    resolver: TokenResolver,
    validator: ThemeValidator,
    switch_lock: Mutex<()>,
    state: RwLock<ActiveState>,
    tenants: RwLock<HashMap<String, Arc<TenantConfig>>>,
    observers: RwLock<Vec<Arc<dyn ThemeObserver>>>,
    #[cfg(feature = "tokio-runner")]
    events: tokio::sync::broadcast::Sender<ThemeChangeEvent>,
    preload: Mutex<Preload>,
}

impl Runtime {
    /// Create a runtime. When the configuration lists themes to preload,
    /// they are loaded on a background thread; see [Runtime::wait_for_preload].
    pub fn new(provider: Arc<dyn ThemeProvider>, config: RuntimeConfig) -> SharedRuntime {
        let runtime = Self::new_deferred(provider, config);
        if !runtime.config.preload_themes.is_empty() {
            runtime.spawn_preload();
        }
        runtime
    }

    /// Create a runtime without starting the preload. Call
    /// [Runtime::preload] (or `preload_async`) when convenient.
    pub fn new_deferred(provider: Arc<dyn ThemeProvider>, config: RuntimeConfig) -> SharedRuntime {
        let cache = Arc::new(RuntimeCache::new());
        let resolver = if config.enable_caching {
            TokenResolver::new(Arc::clone(&cache))
        } else {
            TokenResolver::uncached()
        }
        .with_max_depth(config.max_alias_depth);
        let validator = ThemeValidator::with_config(ValidatorConfig {
            max_alias_depth: config.max_alias_depth,
            ..Default::default()
        });

        Arc::new(Self {
            provider,
            config,
            cache,
            resolver,
            validator,
            switch_lock: Mutex::new(()),
            state: RwLock::new(ActiveState::default()),
            tenants: RwLock::new(HashMap::new()),
            observers: RwLock::new(Vec::new()),
            #[cfg(feature = "tokio-runner")]
            events: tokio::sync::broadcast::channel(EVENT_CAPACITY).0,
            preload: Mutex::new(Preload::Idle),
        })
    }

    fn read_state(&self) -> RwLockReadGuard<'_, ActiveState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, ActiveState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_switch(&self) -> MutexGuard<'_, ()> {
        self.switch_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_preload(&self) -> MutexGuard<'_, Preload> {
        self.preload.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The runtime's configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// The shared cache.
    pub fn cache(&self) -> &Arc<RuntimeCache> {
        &self.cache
    }

    /// Load, compile and activate a theme.
    ///
    /// If the theme fails to load and a fallback is configured, the fallback
    /// is tried once. On any failure the previous theme stays active and the
    /// cache is untouched. Reselecting the active id reloads it and clears
    /// the cache all the same.
    ///
    /// With a tenant set, the tenant's policy must allow the id (and the
    /// fallback, for the fallback to be tried), and the tenant's overrides
    /// are applied before compiling.
    pub fn set_theme(&self, id: &str) -> RuntimeResult<()> {
        let switch = self.lock_switch();
        let tenant = self.read_state().tenant.clone();
        let tenant = tenant.as_deref();
        let policy = self.tenant_policy(tenant);
        Self::check_access(tenant, policy.as_deref(), id)?;

        let theme = self.load(tenant, policy.as_deref(), id)?;
        let theme = match (tenant, policy.as_deref()) {
            (Some(tenant), Some(policy)) if policy.is_customized() => {
                let customized = policy.customize(&theme).map_err(|source| {
                    RuntimeError::Customization {
                        tenant: tenant.to_string(),
                        id: theme.id.clone(),
                        source,
                    }
                })?;
                Arc::new(customized)
            }
            _ => theme,
        };
        let compiled = self.compile(tenant, &theme, policy.as_deref())?;
        if self.config.validate_tokens {
            self.log_validation(&theme);
        }

        let key = ThemeKey::new(tenant, theme.id.as_str());
        let hash = compiled.hash.clone();
        let event = {
            let mut state = self.write_state();
            let previous = state.theme.as_ref().map(|theme| theme.id.clone());
            self.cache.replace_compiled(key.clone(), Arc::new(compiled));
            state.theme = Some(theme);
            state.key = Some(key.clone());
            state.event(ThemeChangeKind::ThemeSwitched, previous)
        };
        drop(switch);

        log::info!("Switched to theme '{}' (hash {})", key, hash);
        self.notify(event);
        Ok(())
    }

    fn tenant_policy(&self, tenant: Option<&str>) -> Option<Arc<TenantConfig>> {
        let tenants = self.tenants.read().unwrap_or_else(PoisonError::into_inner);
        tenants.get(tenant?).cloned()
    }

    fn check_access(
        tenant: Option<&str>,
        policy: Option<&TenantConfig>,
        id: &str,
    ) -> RuntimeResult<()> {
        let (Some(tenant), Some(policy)) = (tenant, policy) else {
            return Ok(());
        };
        if !policy.active {
            return Err(RuntimeError::TenantInactive {
                tenant: tenant.to_string(),
            });
        }
        if !policy.allows(id) {
            return Err(RuntimeError::ThemeNotAllowed {
                tenant: tenant.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    fn load(
        &self,
        tenant: Option<&str>,
        policy: Option<&TenantConfig>,
        id: &str,
    ) -> RuntimeResult<Arc<Theme>> {
        let source = match self.provider.get_tenant_theme(tenant, id) {
            Ok(theme) => return Ok(theme),
            Err(e) => e,
        };

        match self.config.fallback_theme.as_deref() {
            Some(fallback)
                if fallback != id && Self::check_access(tenant, policy, fallback).is_ok() =>
            {
                log::warn!(
                    "Failed to load theme '{}': {}, trying fallback '{}'",
                    id,
                    source,
                    fallback
                );
                self.provider
                    .get_tenant_theme(tenant, fallback)
                    .map_err(|source| RuntimeError::FallbackLoad {
                        id: id.to_string(),
                        fallback: fallback.to_string(),
                        source,
                    })
            }
            _ => Err(RuntimeError::ThemeLoad {
                id: id.to_string(),
                source,
            }),
        }
    }

    fn compile(
        &self,
        tenant: Option<&str>,
        theme: &Theme,
        policy: Option<&TenantConfig>,
    ) -> RuntimeResult<CompiledTheme> {
        let mut css = self
            .provider
            .compile_tenant_theme(tenant, theme)
            .map_err(|source| RuntimeError::Compile {
                id: theme.id.clone(),
                source,
            })?;
        if let Some(custom) = policy.and_then(TenantConfig::custom_css) {
            css.push_str("\n/* Tenant custom CSS */\n");
            css.push_str(custom.trim_end());
            css.push('\n');
        }
        let mut compiled = CompiledTheme::from_css(theme.id.as_str(), theme.name.as_str(), css);

        if self.config.enable_dark_mode {
            if let Some(dark) = theme.dark_variant() {
                let css = self
                    .provider
                    .compile_tenant_theme(tenant, &dark)
                    .map_err(|source| RuntimeError::Compile {
                        id: dark.id.clone(),
                        source,
                    })?;
                compiled = compiled.with_dark_mode(CompiledTheme::from_css(dark.id, dark.name, css));
            }
        }

        log::debug!(
            "Compiled theme '{}': {} variables, {} classes, dark overrides: {}",
            theme.id,
            compiled.variables.len(),
            compiled.classes.len(),
            compiled.dark_mode.is_some()
        );
        Ok(compiled)
    }

    fn log_validation(&self, theme: &Theme) {
        let report = self.validator.validate(theme);
        for error in &report.errors {
            log::warn!("Theme '{}': {}: {}", theme.id, error.token_path, error.error);
        }
        for warning in &report.warnings {
            log::warn!("Theme '{}': {}: {}", theme.id, warning.token_path, warning.message);
        }
    }

    /// Turn dark mode on or off. Clears resolved token values and class
    /// names even when the flag does not change.
    pub fn set_dark_mode(&self, enabled: bool) -> RuntimeResult<()> {
        if !self.config.enable_dark_mode {
            return Err(RuntimeError::DarkModeDisabled);
        }

        let switch = self.lock_switch();
        let event = {
            let mut state = self.write_state();
            state.dark_mode = enabled;
            self.cache.clear();
            let current = state.theme.as_ref().map(|theme| theme.id.clone());
            state.event(ThemeChangeKind::DarkModeToggled, current)
        };
        drop(switch);

        log::info!("Dark mode {}", if enabled { "enabled" } else { "disabled" });
        self.notify(event);
        Ok(())
    }

    /// Whether dark mode is on.
    pub fn dark_mode(&self) -> bool {
        self.read_state().dark_mode
    }

    /// Scope later loads to a tenant. The active theme is not reloaded, and
    /// its resolutions stay cached under the tenant it was loaded for.
    pub fn set_tenant(&self, tenant: Option<&str>) {
        let _switch = self.lock_switch();
        self.write_state().tenant = tenant.map(str::to_string);
        log::debug!("Tenant set to {:?}", tenant);
    }

    /// The current tenant.
    pub fn tenant(&self) -> Option<String> {
        self.read_state().tenant.clone()
    }

    /// Register or replace a tenant's policy and overrides. Token override
    /// paths are checked here; the active theme is not reloaded.
    pub fn configure_tenant(
        &self,
        tenant: impl Into<String>,
        config: TenantConfig,
    ) -> RuntimeResult<()> {
        let tenant = tenant.into();
        if let Err(e) = config.customize(&Theme::default()) {
            return Err(RuntimeError::config(None, format!("tenant '{tenant}': {e}")));
        }

        log::debug!("Configured tenant '{}'", tenant);
        let mut tenants = self.tenants.write().unwrap_or_else(PoisonError::into_inner);
        tenants.insert(tenant, Arc::new(config));
        Ok(())
    }

    /// Drop a tenant's configuration.
    pub fn remove_tenant(&self, tenant: &str) -> Option<TenantConfig> {
        let mut tenants = self.tenants.write().unwrap_or_else(PoisonError::into_inner);
        tenants.remove(tenant).map(Arc::unwrap_or_clone)
    }

    /// A tenant's configuration, if one is registered.
    pub fn tenant_config(&self, tenant: &str) -> Option<TenantConfig> {
        self.tenant_policy(Some(tenant)).map(Arc::unwrap_or_clone)
    }

    /// Check whether a tenant may activate a theme. Tenants without a
    /// configuration may activate anything.
    pub fn validate_tenant_access(&self, tenant: &str, id: &str) -> RuntimeResult<()> {
        let policy = self.tenant_policy(Some(tenant));
        Self::check_access(Some(tenant), policy.as_deref(), id)
    }

    /// Notify `observer` of every later theme switch and dark-mode toggle.
    pub fn add_observer(&self, observer: Arc<dyn ThemeObserver>) {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        observers.push(observer);
    }

    /// Stop notifying `observer`. Returns `false` if it was not registered.
    pub fn remove_observer(&self, observer: &Arc<dyn ThemeObserver>) -> bool {
        let mut observers = self.observers.write().unwrap_or_else(PoisonError::into_inner);
        let before = observers.len();
        observers.retain(|registered| !Arc::ptr_eq(registered, observer));
        observers.len() != before
    }

    /// Receive change events on a tokio broadcast channel.
    #[cfg(feature = "tokio-runner")]
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<ThemeChangeEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: ThemeChangeEvent) {
        let observers = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for observer in &observers {
            observer.on_theme_changed(&event);
        }

        #[cfg(feature = "tokio-runner")]
        {
            if self.events.send(event).is_err() {
                log::trace!("No theme change subscribers");
            }
        }
    }

    /// Resolve a token against the active theme.
    pub fn resolve_token(&self, reference: &str) -> RuntimeResult<String> {
        let state = self.read_state();
        let scope = Self::scope(&state)?;
        Ok(self.resolver.resolve_scoped(&TokenReference::from(reference), scope)?)
    }

    /// Resolve a token and describe the result. Resolution failures are
    /// reported in [ResolvedToken::error].
    pub fn resolve_token_with_metadata(&self, reference: &str) -> RuntimeResult<ResolvedToken> {
        let state = self.read_state();
        let scope = Self::scope(&state)?;
        Ok(self
            .resolver
            .resolve_with_metadata(&TokenReference::from(reference), scope))
    }

    /// Resolve several tokens, failing on the first that does not resolve.
    pub fn resolve_batch(&self, references: &[&str]) -> RuntimeResult<IndexMap<String, String>> {
        let references: Vec<TokenReference> =
            references.iter().map(|r| TokenReference::from(*r)).collect();
        let state = self.read_state();
        let scope = Self::scope(&state)?;
        Ok(self.resolver.resolve_batch(&references, scope)?)
    }

    fn scope(state: &ActiveState) -> RuntimeResult<ResolveScope<'_>> {
        let theme = state.theme.as_deref().ok_or(RuntimeError::NoThemeSet)?;
        Ok(ResolveScope::new(theme, state.dark_mode).with_tenant(state.loaded_tenant()))
    }

    /// Classify a path without resolving it.
    pub fn token_info(&self, path: &str) -> TokenInfo {
        self.resolver.token_info(path)
    }

    /// The custom property name for a path. Does not consult the theme.
    pub fn css_variable(&self, path: &str) -> String {
        css_variable_name(path)
    }

    /// The class name for a component variant.
    pub fn compiled_class(&self, component: &str, variant: &str) -> String {
        if !self.config.enable_caching {
            return class_name(component, variant);
        }

        let tenant = self.read_state().loaded_tenant().map(str::to_string);
        if let Some(class) = self.cache.get_class(tenant.as_deref(), component, variant) {
            return class;
        }
        let class = class_name(component, variant);
        self.cache
            .set_class(tenant.as_deref(), component, variant, class.clone());
        class
    }

    fn compiled_for(&self, state: &ActiveState) -> RuntimeResult<Arc<CompiledTheme>> {
        let key = state.key.as_ref().ok_or(RuntimeError::NoThemeSet)?;
        self.cache
            .get_compiled(key)
            .ok_or_else(|| RuntimeError::NotCompiled { id: key.id.clone() })
    }

    /// The compiled artifact of the active theme.
    pub fn compiled_theme(&self) -> RuntimeResult<Arc<CompiledTheme>> {
        self.compiled_for(&self.read_state())
    }

    /// Every compiled rule for a component and its variants.
    pub fn component_css(&self, component: &str) -> RuntimeResult<String> {
        let compiled = self.compiled_theme()?;
        let rules = compiled.component_rules(component);
        if rules.is_empty() {
            return Err(RuntimeError::ComponentCssNotFound {
                component: component.to_string(),
            });
        }
        Ok(rules.join("\n\n"))
    }

    /// The full stylesheet of the active theme. With dark mode on, the dark
    /// overrides are appended inside a `prefers-color-scheme` media query.
    pub fn theme_css(&self) -> RuntimeResult<String> {
        let state = self.read_state();
        let compiled = self.compiled_for(&state)?;
        if state.dark_mode {
            Ok(compiled.css_with_dark_mode())
        } else {
            Ok(compiled.css.clone())
        }
    }

    /// Metadata about the active theme.
    pub fn current_theme(&self) -> Option<ThemeInfo> {
        let state = self.read_state();
        let theme = state.theme.as_ref()?;
        let tenant = state.loaded_tenant().map(str::to_string);
        Some(ThemeInfo::from_theme(theme, state.dark_mode, tenant))
    }

    /// Metadata about every theme the provider lists that the current
    /// tenant may activate.
    pub fn available_themes(&self) -> Vec<ThemeInfo> {
        let tenant = self.tenant();
        let policy = self.tenant_policy(tenant.as_deref());
        self.provider
            .list_themes()
            .iter()
            .filter(|theme| policy.as_ref().map_or(true, |policy| policy.allows(&theme.id)))
            .map(|theme| ThemeInfo::from_theme(theme, theme.supports_dark_mode(), None))
            .collect()
    }

    /// Load a theme fresh and validate it. The active theme is not affected
    /// and no fallback is attempted.
    pub fn validate_theme(&self, id: &str) -> RuntimeResult<ValidationReport> {
        let tenant = self.tenant();
        let theme = self
            .provider
            .get_tenant_theme(tenant.as_deref(), id)
            .map_err(|source| RuntimeError::ThemeLoad {
                id: id.to_string(),
                source,
            })?;
        Ok(self.validator.validate(&theme))
    }

    /// Wipe the cache, keeping only the active theme's compiled artifact.
    pub fn clear_cache(&self) {
        let state = self.read_state();
        self.cache.clear_all_except(state.key.as_ref());
    }

    /// How many times the resolver has walked a theme tree.
    pub fn navigation_count(&self) -> u64 {
        self.resolver.navigation_count()
    }

    /// Load every configured preload theme through [Runtime::set_theme], in
    /// order. The last one that loads stays active.
    pub fn preload(&self) -> PreloadReport {
        let mut report = PreloadReport::default();
        for id in &self.config.preload_themes {
            match self.set_theme(id) {
                Ok(()) => report.loaded.push(id.clone()),
                Err(e) => {
                    log::warn!("Failed to preload theme '{}': {}", id, e);
                    report.failed.push((id.clone(), e.to_string()));
                }
            }
        }
        log::info!(
            "Preloaded {} theme(s), {} failed",
            report.loaded.len(),
            report.failed.len()
        );
        report
    }

    fn spawn_preload(self: &Arc<Self>) {
        let runtime: Weak<Self> = Arc::downgrade(self);
        let spawned = thread::Builder::new()
            .name("dtk-preload".into())
            .spawn(move || match runtime.upgrade() {
                Some(runtime) => runtime.preload(),
                None => PreloadReport::default(),
            });

        match spawned {
            Ok(handle) => *self.lock_preload() = Preload::Running(handle),
            Err(e) => log::error!("Failed to spawn preload thread: {}", e),
        }
    }

    /// Block until the background preload finishes and return its report.
    /// Returns `None` when no preload was started.
    pub fn wait_for_preload(&self) -> Option<PreloadReport> {
        let mut preload = self.lock_preload();
        match std::mem::take(&mut *preload) {
            Preload::Idle => None,
            Preload::Done(report) => {
                *preload = Preload::Done(report.clone());
                Some(report)
            }
            Preload::Running(handle) => match handle.join() {
                Ok(report) => {
                    *preload = Preload::Done(report.clone());
                    Some(report)
                }
                Err(_) => {
                    log::error!("Preload thread panicked");
                    None
                }
            },
        }
    }

    /// Run the configured preload on the tokio blocking pool.
    #[cfg(feature = "tokio-runner")]
    pub async fn preload_async(self: Arc<Self>) -> PreloadReport {
        let runtime = Arc::clone(&self);
        match tokio::task::spawn_blocking(move || runtime.preload()).await {
            Ok(report) => {
                *self.lock_preload() = Preload::Done(report.clone());
                report
            }
            Err(e) => {
                log::error!("Preload task failed: {}", e);
                PreloadReport::default()
            }
        }
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("config", &self.config)
            .field("state", &*self.read_state())
            .finish_non_exhaustive()
    }
}

//! Dependency binder
//!
//! Wires master fields to their slaves and runs the reactions when a
//! master changes:
//!
//! - `REQUIRE` toggles the slave's required marker
//! - `SHOW` enables and reveals the slave, or disables and hides it
//! - `CLONE` copies the master's value into the slave and propagates the
//!   change
//! - `AJAX_UPDATE` batches every registered slave of the master into one
//!   lookup request per endpoint
//!
//! Change handling never blocks. Lookups come back as [`LookupTask`]s for
//! the caller to run or spawn.

mod apply;
mod event;
mod registration;
mod task;

#[cfg(test)]
mod tests;

pub use apply::apply_field_value;
pub use event::{ChangeEvent, ChangeOrigin};
pub use registration::SlaveRegistration;
pub use task::{LookupOutcome, LookupTask};

use crate::config::EngineConfig;
use crate::declaration::{Action, DependencyDeclaration};
use crate::form::{resolve_masters, resolve_slave, FieldKind, FieldRef, FormHandle, Naming};
use crate::transport::{LookupRequest, LookupTransport};
use crate::value::Value;
use registration::{Listener, MasterBinding};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use task::SequenceGuard;
use tokio::task::JoinHandle;

/// Binds dependency declarations to one form
pub struct DependencyBinder {
    form: Arc<dyn FormHandle>,
    transport: Arc<dyn LookupTransport>,
    naming: Naming,
    timeout: Option<Duration>,
    discard_stale: bool,
    /// Keyed by the master's DOM id
    masters: HashMap<String, MasterBinding>,
}

impl DependencyBinder {
    pub fn new(
        form: Arc<dyn FormHandle>,
        transport: Arc<dyn LookupTransport>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            form,
            transport,
            naming: config.naming(),
            timeout: config.lookup_timeout(),
            discard_stale: config.discard_stale_responses,
            masters: HashMap::new(),
        }
    }

    /// Wire every declaration, then fire the page-load change once per
    /// bound master.
    ///
    /// Declarations whose master or slave is not in the form bind nothing.
    /// Returns the lookups the page-load changes started.
    pub fn bind(&mut self, declarations: &[DependencyDeclaration]) -> Vec<LookupTask> {
        let mut bound = Vec::new();

        for declaration in declarations {
            if let Err(e) = declaration.validate() {
                tracing::warn!("Not binding dependency: {e}");
                continue;
            }
            for key in self.bind_one(declaration) {
                if !bound.contains(&key) {
                    bound.push(key);
                }
            }
        }

        tracing::debug!(
            "Bound {} dependencies over {} masters",
            declarations.len(),
            bound.len()
        );

        bound
            .iter()
            .flat_map(|key| self.dispatch(key, ChangeEvent::page_load()))
            .collect()
    }

    /// Wire one declaration to every master it resolves to
    fn bind_one(&mut self, declaration: &DependencyDeclaration) -> Vec<String> {
        let mut keys = Vec::new();

        for master in resolve_masters(self.form.as_ref(), &declaration.master, &self.naming) {
            let Some(slave) = resolve_slave(
                self.form.as_ref(),
                &declaration.slave,
                master.block.as_deref(),
                &self.naming,
            ) else {
                continue;
            };

            let key = master.field.dom_id();
            let binding = self
                .masters
                .entry(key.clone())
                .or_insert_with(|| MasterBinding::new(master.field));
            let condition = declaration.condition.clone();

            match declaration.action {
                Action::Require => binding.listeners.push(Listener::Require { slave, condition }),
                Action::Show => binding.listeners.push(Listener::Show { slave, condition }),
                Action::Clone => binding.listeners.push(Listener::Clone {
                    slave,
                    condition,
                    page_load_update: declaration.options.page_load_update,
                }),
                Action::AjaxUpdate => {
                    let Some(url) = declaration.options.url.clone() else {
                        continue;
                    };
                    binding.register(SlaveRegistration {
                        field: slave,
                        condition,
                        page_load_update: declaration.options.page_load_update,
                        url,
                    });
                }
            }
            keys.push(key);
        }
        keys
    }

    /// Handle a user-driven change of the field with `dom_id`
    pub fn change(&self, dom_id: &str) -> Vec<LookupTask> {
        self.dispatch(dom_id, ChangeEvent::user())
    }

    /// Handle a user-driven change and spawn its lookups on the current
    /// tokio runtime
    pub fn spawn_change(&self, dom_id: &str) -> Vec<JoinHandle<LookupOutcome>> {
        self.change(dom_id)
            .into_iter()
            .map(|task| tokio::spawn(task.run()))
            .collect()
    }

    /// Run the change handler of `dom_id` for `event`.
    ///
    /// Unbound fields are ignored.
    pub fn dispatch(&self, dom_id: &str, event: ChangeEvent) -> Vec<LookupTask> {
        let Some(binding) = self.masters.get(dom_id) else {
            return Vec::new();
        };
        let value = binding.field.value();
        let mut tasks = Vec::new();

        for listener in &binding.listeners {
            match listener {
                Listener::Require { slave, condition } => {
                    slave.set_required(condition.met(&value));
                }
                Listener::Show { slave, condition } => {
                    let met = condition.met(&value);
                    slave.set_enabled(met);
                    slave.set_visible(met);
                }
                Listener::Clone {
                    slave,
                    condition,
                    page_load_update,
                } => {
                    if event.is_page_load() && !page_load_update {
                        continue;
                    }
                    let target = slave.dom_id();
                    if target == dom_id || event.has_visited(&target) {
                        tracing::debug!("Not cloning {dom_id} back into {target}");
                        continue;
                    }
                    if !condition.met(&value) {
                        continue;
                    }
                    copy_value(slave.as_ref(), &value);
                    tasks.extend(self.dispatch(&target, event.cloned_from(dom_id)));
                }
                Listener::AjaxUpdate => {
                    tasks.extend(self.lookup_batch(binding, &value, &event));
                }
            }
        }
        tasks
    }

    /// Lookups for the registered slaves whose conditions pass, one per
    /// endpoint
    fn lookup_batch(
        &self,
        binding: &MasterBinding,
        value: &Value,
        event: &ChangeEvent,
    ) -> Vec<LookupTask> {
        // Every change supersedes the lookups in flight, even one that
        // sends nothing itself.
        let issued = binding.next_sequence();

        let passed: Vec<&SlaveRegistration> = binding
            .registrations
            .iter()
            .filter(|r| r.should_run(event))
            .filter(|r| r.condition.met(value))
            .collect();
        if passed.is_empty() {
            return Vec::new();
        }

        for registration in &passed {
            registration.field.set_loading(true);
        }

        let guard = self.discard_stale.then(|| SequenceGuard {
            latest: Arc::clone(&binding.sequence),
            issued,
        });

        let mut by_url: Vec<(&str, Vec<Arc<dyn FieldRef>>)> = Vec::new();
        for registration in passed {
            let field = Arc::clone(&registration.field);
            match by_url.iter().position(|(url, _)| *url == registration.url.as_str()) {
                Some(i) => by_url[i].1.push(field),
                None => by_url.push((registration.url.as_str(), vec![field])),
            }
        }

        let form_value = value.to_form_string();
        by_url
            .into_iter()
            .map(|(url, slaves)| LookupTask {
                request: LookupRequest {
                    url: url.to_string(),
                    value: form_value.clone(),
                },
                slaves,
                transport: Arc::clone(&self.transport),
                naming: self.naming.clone(),
                timeout: self.timeout,
                guard: guard.clone(),
            })
            .collect()
    }

    /// Registrations of a bound master, in binding order
    pub fn registrations(&self, dom_id: &str) -> &[SlaveRegistration] {
        self.masters
            .get(dom_id)
            .map(|b| b.registrations.as_slice())
            .unwrap_or_default()
    }

    /// Whether `dom_id` has a change handler
    pub fn is_bound(&self, dom_id: &str) -> bool {
        self.masters.contains_key(dom_id)
    }
}

fn copy_value(slave: &dyn FieldRef, value: &Value) {
    match (slave.kind(), value) {
        (FieldKind::Checkbox, Value::Bool(checked)) => slave.set_checked(*checked),
        _ => slave.set_value(&value.to_form_string()),
    }
}

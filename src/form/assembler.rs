//! One forward pass from element descriptions to a live form window

use super::element::{ElementKind, ElementSpec};
use super::extract::ExtractorRegistry;
use super::factory::{ControlHandle, FactoryContext, FactoryRegistry, FormContainer};
use super::reflow::ReflowEngine;
use super::window::{FormWindow, WindowParts};
use crate::config::FormConfig;
use crate::error::FormError;
use crate::ui::WidgetTree;
use indexmap::IndexMap;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// A named control whose value is read when the form is accepted
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlRegistration {
    pub name: String,
    pub kind: ElementKind,
    pub handle: ControlHandle,
}

/// Named controls in registration order
///
/// Registering a name twice keeps the later control; the earlier one
/// still renders but is no longer read.
#[derive(Clone, Debug, Default)]
pub struct ControlRegistry {
    controls: IndexMap<String, ControlRegistration>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, registration: ControlRegistration) {
        if let Some(previous) = self.controls.get(&registration.name) {
            warn!(
                name = %registration.name,
                shadowed = ?previous.handle,
                "duplicate control name, earlier control will not be collected"
            );
        }
        self.controls.insert(registration.name.clone(), registration);
    }

    pub fn get(&self, name: &str) -> Option<&ControlRegistration> {
        self.controls.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ControlRegistration> {
        self.controls.values()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}

/// What pressing a button does, decided by its caption
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonRole {
    Accept,
    Cancel,
    /// Renders and takes focus, nothing else
    Inert,
}

impl ButtonRole {
    pub fn from_caption(caption: &str) -> Self {
        match caption.trim().to_lowercase().as_str() {
            "accept" | "aceptar" | "ok" => ButtonRole::Accept,
            "cancel" | "cancelar" => ButtonRole::Cancel,
            _ => ButtonRole::Inert,
        }
    }
}

/// Turns element lists into windows using a pair of kind registries
#[derive(Clone)]
pub struct FormAssembler {
    config: FormConfig,
    factories: FactoryRegistry,
    extractors: ExtractorRegistry,
}

impl FormAssembler {
    pub fn new(config: FormConfig, factories: FactoryRegistry, extractors: ExtractorRegistry) -> Self {
        Self {
            config,
            factories,
            extractors,
        }
    }

    /// Assembler with every built-in kind registered
    pub fn standard(config: FormConfig) -> Self {
        Self::new(config, FactoryRegistry::standard(), ExtractorRegistry::standard())
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Build every element in order and wire up the window
    ///
    /// Any configuration error aborts the whole form; no window exists
    /// until every element has been built.
    pub fn assemble(&self, title: &str, elements: &[ElementSpec]) -> Result<FormWindow, FormError> {
        let mut container = FormContainer::new(&self.config);
        let mut registry = ControlRegistry::new();
        let mut reflow = ReflowEngine::new(&self.config);
        let mut actions = HashMap::new();
        let mut order = Vec::with_capacity(elements.len());

        for (index, element) in elements.iter().enumerate() {
            element.validate()?;
            let mut ctx = FactoryContext {
                container: &mut container,
                config: &self.config,
                index,
                name: element.name.as_deref(),
            };
            let handle = self.factories.create(element.kind, &element.data, &mut ctx)?;

            if element.kind.is_text() {
                if let Some(text) = element.data.as_text() {
                    reflow.track(handle.clone(), text);
                }
            }

            if element.kind == ElementKind::Buttons {
                for caption in element.data.as_options().unwrap_or_default() {
                    let role = ButtonRole::from_caption(caption);
                    debug!(caption = %caption, ?role, "button bound");
                    actions.insert(caption.clone(), role);
                }
            }

            if let Some(name) = element.name.as_ref().filter(|_| element.kind.produces_value()) {
                if self.extractors.get(element.kind).is_none() {
                    return Err(FormError::MissingExtractor(element.kind));
                }
                registry.register(ControlRegistration {
                    name: name.clone(),
                    kind: element.kind,
                    handle: handle.clone(),
                });
            }

            order.push((element.kind, handle));
        }

        info!(
            title,
            elements = elements.len(),
            named = registry.len(),
            "form assembled"
        );

        let tree = WidgetTree::with_theme(container.into_node(), self.config.theme());
        Ok(FormWindow::from_parts(WindowParts {
            title: title.to_string(),
            config: self.config.clone(),
            tree,
            registry,
            extractors: self.extractors.clone(),
            reflow,
            actions,
            elements: order,
        }))
    }
}

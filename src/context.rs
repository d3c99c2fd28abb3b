use crate::backend::{ObjectIdFormatter, PlainObjectId, Transport};
use crate::children::dedup::{AccessorConvention, PrefixConvention};
use crate::config::InspectorConfig;
use crate::symbols::{SourcePosition, SymbolIndex};
use crate::value::presentation::{FullValueCallback, MarkupEvaluator};
use crate::value::{ValueNode, ValueRole};
use std::sync::Arc;

/// Markup evaluator for setups without one, always fails.
struct NoMarkupEvaluator;

impl MarkupEvaluator for NoMarkupEvaluator {
    fn evaluate(&self, _: &str, _: &str, callback: FullValueCallback) {
        callback(Err("markup evaluation is not supported".to_string()))
    }
}

/// Collaborators shared by all values inspected in a single stack frame.
pub struct InspectContext {
    transport: Arc<dyn Transport>,
    symbols: Option<Arc<dyn SymbolIndex>>,
    markup: Arc<dyn MarkupEvaluator>,
    ids: Arc<dyn ObjectIdFormatter>,
    convention: Arc<dyn AccessorConvention>,
    config: InspectorConfig,
    position: Option<SourcePosition>,
}

impl InspectContext {
    pub fn builder(transport: Arc<dyn Transport>) -> ContextBuilder {
        ContextBuilder {
            transport,
            symbols: None,
            markup: None,
            ids: None,
            convention: None,
            config: InspectorConfig::default(),
            position: None,
        }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn symbols(&self) -> Option<&Arc<dyn SymbolIndex>> {
        self.symbols.as_ref()
    }

    pub fn markup_evaluator(&self) -> Arc<dyn MarkupEvaluator> {
        Arc::clone(&self.markup)
    }

    pub fn accessor_convention(&self) -> &dyn AccessorConvention {
        self.convention.as_ref()
    }

    pub fn config(&self) -> &InspectorConfig {
        &self.config
    }

    /// Code location of the inspected frame.
    pub fn position(&self) -> Option<&SourcePosition> {
        self.position.as_ref()
    }

    pub fn format_id(&self, raw_id: &str) -> String {
        self.ids.format(raw_id)
    }

    /// Create a root value (a frame variable, argument or `this`) from a backend reply.
    pub fn root_value(
        self: &Arc<Self>,
        name: &str,
        raw_result: &str,
        role: ValueRole,
    ) -> ValueNode {
        ValueNode::new(Arc::clone(self), name, name, raw_result, None, role)
    }
}

pub struct ContextBuilder {
    transport: Arc<dyn Transport>,
    symbols: Option<Arc<dyn SymbolIndex>>,
    markup: Option<Arc<dyn MarkupEvaluator>>,
    ids: Option<Arc<dyn ObjectIdFormatter>>,
    convention: Option<Arc<dyn AccessorConvention>>,
    config: InspectorConfig,
    position: Option<SourcePosition>,
}

impl ContextBuilder {
    pub fn with_symbols(self, symbols: Arc<dyn SymbolIndex>) -> Self {
        Self {
            symbols: Some(symbols),
            ..self
        }
    }

    pub fn with_markup_evaluator(self, markup: Arc<dyn MarkupEvaluator>) -> Self {
        Self {
            markup: Some(markup),
            ..self
        }
    }

    pub fn with_id_formatter(self, ids: Arc<dyn ObjectIdFormatter>) -> Self {
        Self {
            ids: Some(ids),
            ..self
        }
    }

    /// Override accessor/backing field convention, by default it is derived from
    /// [`InspectorConfig::backing_field_prefix`].
    pub fn with_accessor_convention(self, convention: Arc<dyn AccessorConvention>) -> Self {
        Self {
            convention: Some(convention),
            ..self
        }
    }

    pub fn with_config(self, config: InspectorConfig) -> Self {
        Self { config, ..self }
    }

    pub fn with_position(self, position: SourcePosition) -> Self {
        Self {
            position: Some(position),
            ..self
        }
    }

    pub fn build(self) -> Arc<InspectContext> {
        let convention: Arc<dyn AccessorConvention> = match self.convention {
            Some(convention) => convention,
            None => Arc::new(PrefixConvention::new(&self.config.backing_field_prefix)),
        };
        let markup: Arc<dyn MarkupEvaluator> = match self.markup {
            Some(markup) => markup,
            None => Arc::new(NoMarkupEvaluator),
        };
        let ids: Arc<dyn ObjectIdFormatter> = match self.ids {
            Some(ids) => ids,
            None => Arc::new(PlainObjectId),
        };

        Arc::new(InspectContext {
            transport: self.transport,
            symbols: self.symbols,
            markup,
            ids,
            convention,
            config: self.config,
            position: self.position,
        })
    }
}

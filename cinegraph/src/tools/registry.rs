use super::{Tool, ToolDescriptor};

/// Ordered collection of tools. Registration order is the scan order of
/// [`ToolRegistry::find_in`] and the listing order shown to the model.
///
/// # Examples
///
/// ```
/// use cinegraph::tools::{CalculatorTool, Tool, ToolRegistry};
///
/// let mut registry = ToolRegistry::new();
/// registry.register(Box::new(CalculatorTool::new()));
/// assert_eq!(registry.descriptors()[0].name, "calculator");
/// assert!(registry.find_in("CALCULATOR: 2 + 2").is_some());
/// ```
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tool at the end. A tool with the same name is replaced in place.
    pub fn register(&mut self, tool: Box<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(i) => self.tools[i] = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| t.descriptor()).collect()
    }

    /// First registered tool whose name occurs anywhere in the lower-cased `response`.
    pub fn find_in(&self, response: &str) -> Option<&dyn Tool> {
        let lower = response.to_lowercase();
        self.tools
            .iter()
            .find(|t| lower.contains(t.name()))
            .map(|t| t.as_ref())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|t| t.as_ref())
    }
}

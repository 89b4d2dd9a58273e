//! Interfaces implemented by synthesized artifacts.

use std::any::Any;

/// A property value moved in or out of an instance.
pub type Value = Box<dyn Any + Send>;

/// Creates instances of one data-model type without generic reflection.
pub trait InstantiationOptimizer: Send + Sync {
    /// Creates a new, empty instance.
    fn new_instance(&self) -> Box<dyn Any + Send>;
}

/// Reads and writes all properties of one type in plan order.
pub trait AccessOptimizer: Send + Sync {
    /// Property names in the positional order the accessor uses.
    fn property_names(&self) -> Vec<String>;

    /// Reads every property of `target`, in [`property_names`](Self::property_names) order.
    fn get_property_values(&self, target: &dyn Any) -> Vec<Value>;

    /// Writes every property of `target`, in [`property_names`](Self::property_names) order.
    fn set_property_values(&self, target: &mut dyn Any, values: Vec<Value>);
}

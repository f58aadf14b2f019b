// separator == "/"
const DOMAIN_SEPARATOR: [u8; 1] = [47];

/// A unique identifier for each state variable in a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePrefix {
    module_path: &'static str,
    module_name: &'static str,
    storage_name: &'static str,
}

impl ModulePrefix {
    /// Creates a new prefix for the state variable `storage_name` of the
    /// module `module_name` living at `module_path`.
    pub fn new_storage(
        module_path: &'static str,
        module_name: &'static str,
        storage_name: &'static str,
    ) -> Self {
        Self {
            module_path,
            module_name,
            storage_name,
        }
    }

    fn combine_prefix(&self) -> Vec<u8> {
        let mut combined_prefix = Vec::with_capacity(
            self.module_path.len()
                + self.module_name.len()
                + self.storage_name.len()
                + 3 * DOMAIN_SEPARATOR.len(),
        );

        combined_prefix.extend(self.module_path.as_bytes());
        combined_prefix.extend(DOMAIN_SEPARATOR);
        combined_prefix.extend(self.module_name.as_bytes());
        combined_prefix.extend(DOMAIN_SEPARATOR);
        combined_prefix.extend(self.storage_name.as_bytes());
        combined_prefix.extend(DOMAIN_SEPARATOR);
        combined_prefix
    }
}

impl From<ModulePrefix> for ballot_state::Prefix {
    fn from(prefix: ModulePrefix) -> Self {
        ballot_state::Prefix::new(prefix.combine_prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_of_distinct_fields_differ() {
        let left: ballot_state::Prefix =
            ModulePrefix::new_storage("my-module", "Module", "left").into();
        let right: ballot_state::Prefix =
            ModulePrefix::new_storage("my-module", "Module", "right").into();
        assert_ne!(left, right);
    }

    #[test]
    fn test_prefix_layout() {
        let prefix: ballot_state::Prefix =
            ModulePrefix::new_storage("my-module", "Module", "field").into();
        assert_eq!(prefix.as_bytes(), b"my-module/Module/field/");
    }
}

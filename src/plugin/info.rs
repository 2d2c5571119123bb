/// Kind of plugin, as a host categorises it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginType {
    /// One input frame, one output frame
    Filter,
}

/// Pixel layout the plugin expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel {
    /// 8 bits per channel, R G B A in memory order
    Rgba8888,
}

/// Type of a host-visible parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Double,
}

/// Static description of the plugin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub author: &'static str,
    pub plugin_type: PluginType,
    pub color_model: ColorModel,
    /// Major version of the host API this plugin speaks
    pub api_version: u32,
    pub major_version: u32,
    pub minor_version: u32,
    pub num_params: usize,
    pub explanation: &'static str,
}

/// Static description of one parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: &'static str,
    pub kind: ParamKind,
    pub explanation: Option<&'static str>,
}

pub const FIRE_INTENSITY: usize = 0;
pub const NOISE_INTENSITY: usize = 1;

static PARAMS: [ParamInfo; 2] = [
    ParamInfo {
        name: "Fire intensity",
        kind: ParamKind::Double,
        explanation: None,
    },
    ParamInfo {
        name: "Noise intensity",
        kind: ParamKind::Double,
        explanation: None,
    },
];

/// Describe the plugin to a host
pub fn plugin_info() -> PluginInfo {
    PluginInfo {
        name: "secamiz0r",
        author: "tuorqai",
        plugin_type: PluginType::Filter,
        color_model: ColorModel::Rgba8888,
        api_version: 1,
        major_version: 1,
        minor_version: 0,
        num_params: PARAMS.len(),
        explanation: "SECAM Fire effect",
    }
}

/// Describe the parameter at `index`, if there is one
pub fn param_info(index: usize) -> Option<&'static ParamInfo> {
    PARAMS.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_info() {
        let info = plugin_info();
        assert_eq!(info.name, "secamiz0r");
        assert_eq!(info.plugin_type, PluginType::Filter);
        assert_eq!(info.color_model, ColorModel::Rgba8888);
        assert_eq!((info.major_version, info.minor_version), (1, 0));
        assert_eq!(info.num_params, 2);
    }

    #[test]
    fn test_param_info() {
        assert_eq!(param_info(FIRE_INTENSITY).unwrap().name, "Fire intensity");
        assert_eq!(param_info(NOISE_INTENSITY).unwrap().name, "Noise intensity");
        assert!(param_info(NOISE_INTENSITY).unwrap().explanation.is_none());
        assert!(param_info(2).is_none());
    }
}

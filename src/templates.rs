pub const ROOT_WEBPACK_CONFIG_JS: &str = include_str!("../templates/root_webpack_config.js");
pub const PROJECT_WEBPACK_CONFIG_JS: &str =
    include_str!("../templates/project_webpack_config.js");

/// Substring whose presence means `main.js` already carries the hook.
pub const WEBPACK_FINAL_MARKER: &str = "webpackFinal";

/// Commented `webpackFinal` block inserted ahead of each `};` in `main.js`.
pub const WEBPACK_FINAL_HOOK: &str = "// webpackFinal: async (config, { configType }) => {
//   // Make whatever fine-grained changes you need that should apply to all storybook configs

//   // Return the altered config
//   return config;
// },
";

//! Interface strings for the supported UI languages.

/// Interface strings for one UI language.
#[derive(Debug)]
pub struct Messages {
    pub translating: &'static str,
    pub target: &'static str,
    pub thinking: &'static str,
    pub supported_languages: &'static str,
    pub language_code: &'static str,
    pub language_name: &'static str,
    pub usage: &'static str,
    pub config_not_found: &'static str,
    pub api_key_not_configured: &'static str,
    pub select_target_language: &'static str,
    pub current_config: &'static str,
    pub provider: &'static str,
    pub model: &'static str,
    pub primary_language: &'static str,
    pub base_url: &'static str,
    pub api_key_configured: &'static str,
    pub api_key_not_set: &'static str,
    pub config_exists: &'static str,
    pub config_will_overwrite: &'static str,
    pub continue_init: &'static str,
    pub init_cancelled: &'static str,
    pub choose_provider: &'static str,
    pub api_key_prompt: &'static str,
    pub select_model: &'static str,
    pub custom_base_url: &'static str,
    pub enter_base_url: &'static str,
    pub enter_api_url: &'static str,
    pub enter_model_name: &'static str,
    pub config_saved: &'static str,
    pub config_file: &'static str,
    pub try_it: &'static str,
    pub default_behavior: &'static str,
}

static ZH_CN: Messages = Messages {
    translating: "🔍 正在翻译：",
    target: "🎯 目标语言：",
    thinking: "🤖 思考中...",
    supported_languages: "🌍 支持的语言",
    language_code: "语言代码",
    language_name: "语言名称",
    usage: "💡 用法：",
    config_not_found: "⚠️  找不到配置文件。请先运行 'lu init'。",
    api_key_not_configured: "⚠️  API密钥未配置。请运行 'lu init' 进行设置。",
    select_target_language: "🎯 请选择目标语言：",
    current_config: "📋 当前配置：",
    provider: "服务商：",
    model: "模型：",
    primary_language: "主语言：",
    base_url: "基础URL：",
    api_key_configured: "API密钥：已配置",
    api_key_not_set: "API密钥：未设置",
    config_exists: "⚠️  检测到现有配置",
    config_will_overwrite: "重新初始化将覆盖您当前的所有配置。",
    continue_init: "您确定要继续吗？",
    init_cancelled: "❌ 初始化已取消",
    choose_provider: "📡 请选择您的AI服务商：",
    api_key_prompt: "请输入您的 API 密钥：",
    select_model: "🤖 选择模型：",
    custom_base_url: "使用自定义基础URL？（代理/备用端点）",
    enter_base_url: "输入基础URL：",
    enter_api_url: "输入API基础URL（如：http://localhost:8000/v1）：",
    enter_model_name: "输入模型名称：",
    config_saved: "🎉 配置已保存！",
    config_file: "📁 配置文件：",
    try_it: "💡 试试看：",
    default_behavior: "🎯 默认翻译行为：\n  • 非主语言内容 → 主语言\n  • 主语言内容 → 交互式选择目标语言",
};

static EN: Messages = Messages {
    translating: "🔍 Translating:",
    target: "🎯 Target language:",
    thinking: "🤖 Thinking...",
    supported_languages: "🌍 Supported languages",
    language_code: "Code",
    language_name: "Language",
    usage: "💡 Usage:",
    config_not_found: "⚠️  Configuration file not found. Please run 'lu init' first.",
    api_key_not_configured: "⚠️  API key not configured. Please run 'lu init' to set it up.",
    select_target_language: "🎯 Select target language:",
    current_config: "📋 Current configuration:",
    provider: "Provider:",
    model: "Model:",
    primary_language: "Primary language:",
    base_url: "Base URL:",
    api_key_configured: "API key: configured",
    api_key_not_set: "API key: not set",
    config_exists: "⚠️  Existing configuration detected",
    config_will_overwrite: "Re-initializing will overwrite your current configuration.",
    continue_init: "Are you sure you want to continue?",
    init_cancelled: "❌ Initialization cancelled",
    choose_provider: "📡 Choose your AI provider:",
    api_key_prompt: "Enter your API key:",
    select_model: "🤖 Select a model:",
    custom_base_url: "Use a custom base URL? (proxy/alternative endpoint)",
    enter_base_url: "Enter base URL:",
    enter_api_url: "Enter API base URL (e.g. http://localhost:8000/v1):",
    enter_model_name: "Enter model name:",
    config_saved: "🎉 Configuration saved!",
    config_file: "📁 Config file:",
    try_it: "💡 Try it:",
    default_behavior: "🎯 Default translation behavior:\n  • Non-primary language → primary language\n  • Primary language → choose the target interactively",
};

impl Messages {
    /// Chinese strings for any `zh*` primary language, English otherwise.
    pub fn for_language(primary_lang: &str) -> &'static Self {
        if primary_lang.starts_with("zh") {
            &ZH_CN
        } else {
            &EN
        }
    }
}

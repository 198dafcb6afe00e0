/// 程序配置
///
/// 所有路径 / 阈值 / 并发度都集中在这里，不使用任何进程级可变全局状态。
/// 构建时传入 TaskBuilder 和各个 Flow。
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时处理的样本数量（工作池上限）
    pub max_concurrent_samples: usize,
    /// taxonomy 表路径（CSV: sample_id, species_id, Kingdom, relative, file）
    pub taxonomy_file: String,
    /// 培养基表路径（CSV: reaction, flux）
    pub medium_file: String,
    /// 群落模型制品输出目录
    pub out_dir: String,
    /// 聚合结果输出目录
    pub results_dir: String,
    /// 细菌模型库目录（AGORA）
    pub bacteria_dir: String,
    /// 真菌模型库目录（CarveFungi）
    pub fungi_dir: String,
    /// 相对丰度过滤阈值（严格大于）
    pub abundance_threshold: f64,
    /// 制品文件名前缀（多个时用 '-' 连接，如 0.1cal-0.3prob）
    pub prefixes: Vec<String>,
    /// tradeoff 分数列表
    pub tradeoffs: Vec<f64>,
    /// 聚合结果文件名中的描述标签
    pub result_label: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_samples: 16,
            taxonomy_file: "data/taxonomy_species.csv".to_string(),
            medium_file: "data/medium_gapfilled_species.csv".to_string(),
            out_dir: "models".to_string(),
            results_dir: "results".to_string(),
            bacteria_dir: "database/AGORA201".to_string(),
            fungi_dir: "database/carvefungi/mapped_models".to_string(),
            abundance_threshold: 5e-5,
            prefixes: vec!["0.1cal".to_string()],
            tradeoffs: vec![0.8],
            result_label: "invade0.1".to_string(),
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            max_concurrent_samples: std::env::var("MAX_CONCURRENT_SAMPLES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_concurrent_samples),
            taxonomy_file: std::env::var("TAXONOMY_FILE").unwrap_or(default.taxonomy_file),
            medium_file: std::env::var("MEDIUM_FILE").unwrap_or(default.medium_file),
            out_dir: std::env::var("OUT_DIR").unwrap_or(default.out_dir),
            results_dir: std::env::var("RESULTS_DIR").unwrap_or(default.results_dir),
            bacteria_dir: std::env::var("BACTERIA_DIR").unwrap_or(default.bacteria_dir),
            fungi_dir: std::env::var("FUNGI_DIR").unwrap_or(default.fungi_dir),
            abundance_threshold: std::env::var("ABUNDANCE_THRESHOLD")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.abundance_threshold),
            prefixes: std::env::var("PREFIXES")
                .ok()
                .map(|v| v.split(',').map(str::to_string).collect())
                .unwrap_or(default.prefixes),
            tradeoffs: std::env::var("TRADEOFFS")
                .ok()
                .map(|v| v.split(',').filter_map(|t| t.parse().ok()).collect())
                .unwrap_or(default.tradeoffs),
            result_label: std::env::var("RESULT_LABEL").unwrap_or(default.result_label),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
        }
    }

    /// 制品文件名中的配置标签（多个前缀用 '-' 连接）
    pub fn config_label(&self) -> String {
        self.prefixes.join("-")
    }
}

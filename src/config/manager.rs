//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    ExportSettings,
    SettingsOverrides,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: ExportSettings,

    /// プロジェクトのルートパス
    project_root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: ExportSettings::default(), project_root: None }
    }

    /// 設定を読み込む
    ///
    /// # Arguments
    /// * `project_root` - プロジェクトのルートパス
    ///
    /// # Returns
    /// - `Ok(())`: 設定の読み込みとバリデーション成功
    /// - `Err(ConfigError)`: エラー
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, project_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for project: {:?}", project_root);

        let settings = if let Some(root) = &project_root {
            loader::load_from_project(root)?.map_or_else(ExportSettings::default, |loaded| {
                tracing::debug!("Loaded project settings: {:?}", loaded);
                loaded
            })
        } else {
            ExportSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.project_root = project_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// コマンドライン引数で設定を上書きする
    ///
    /// # Errors
    /// 上書き後の設定が無効な場合はバリデーションエラー（現在の設定は変更しない）
    pub fn apply_overrides(&mut self, overrides: SettingsOverrides) -> Result<(), ConfigError> {
        tracing::debug!("Applying overrides: {:?}", overrides);
        self.update_settings(self.current_settings.clone().with_overrides(overrides))
    }

    /// 設定を更新する
    pub fn update_settings(&mut self, new_settings: ExportSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &ExportSettings {
        &self.current_settings
    }

    /// プロジェクトルートを取得
    #[must_use]
    pub const fn project_root(&self) -> Option<&PathBuf> {
        self.project_root.as_ref()
    }

    /// `.properties` ファイルのディレクトリ（相対パスはプロジェクトルート基準）
    #[must_use]
    pub fn resources_dir(&self) -> PathBuf {
        self.resolve(&self.current_settings.resources_dir)
    }

    /// 出力ルート（未設定ならプロジェクトルート）
    #[must_use]
    pub fn output_root(&self) -> PathBuf {
        self.current_settings.output_root.as_deref().map_or_else(
            || self.project_root.clone().unwrap_or_else(|| PathBuf::from(".")),
            |root| self.resolve(root),
        )
    }

    /// プロジェクトルートを基準にパスを解決する
    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.project_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

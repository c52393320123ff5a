use crate::fx::AnimatorController;
use crate::menu::MenuAssetFile;
use crate::parameters::ParameterTable;

/// The avatar assets the generator mutates: the FX controller slot, the
/// synced parameter table and the expression menu backing file, each with
/// the store path its changes are flushed under.
///
/// The controller and parameter table are optional because a freshly set up
/// avatar may not have them yet; generation requires both and fails early
/// otherwise.
#[derive(Debug)]
pub struct Avatar {
    pub name: String,
    pub write_defaults: bool,
    pub fx_path: String,
    pub fx: Option<AnimatorController>,
    pub parameters_path: String,
    pub parameters: Option<ParameterTable>,
    pub menu_path: String,
    pub menu: MenuAssetFile,
}

impl Avatar {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Avatar {
            fx_path: format!("Avatars/{name}/FX.controller"),
            fx: Some(AnimatorController::default()),
            parameters_path: format!("Avatars/{name}/Parameters.asset"),
            parameters: Some(ParameterTable::default()),
            menu_path: format!("Avatars/{name}/Menu.asset"),
            menu: MenuAssetFile::default(),
            write_defaults: false,
            name,
        }
    }
}

//! Moodle `config.php` rendering.
//!
//! The application under test reads its settings from environment variables
//! that the containers provide, so the rendered file is mostly static glue.
//! The only recipe-dependent part is the PHPUnit block, emitted when the
//! recipe enables the PHPUnit test environment.

use crate::recipe::types::Recipe;

const HEADER: &str = r#"<?php  // Moodle configuration file — generated by skillet, do not edit.

unset($CFG);
global $CFG;
$CFG = new stdClass();

$CFG->dbtype    = getenv('DB_TYPE');
$CFG->dbhost    = getenv('DB_HOST');
$CFG->dbname    = getenv('DB_NAME');
$CFG->dbuser    = getenv('DB_USER');
$CFG->dbpass    = getenv('DB_PASS');
$CFG->prefix    = 'mdl_';

if ($CFG->dbtype === 'mysqli') {
    $CFG->dblibrary = 'native';
    $CFG->dboptions = [
        'dbpersist' => 0,
        'dbcollation' => 'utf8mb4_unicode_ci',
    ];
}

$CFG->wwwroot   = getenv('WWW_ROOT');
$CFG->dataroot  = getenv('MOODLE_DATA');
$CFG->admin     = 'admin';

$CFG->directorypermissions = 0777;
"#;

const PHPUNIT_BLOCK: &str = r#"
$CFG->phpunit_dataroot = getenv('MOODLE_DATA').'/moodle-phpunit';
$CFG->phpunit_prefix = 'phu_';
"#;

const FOOTER: &str = r#"
// Force a debugging mode regardless the settings in the site administration
$debug = getenv('DEBUG');

if ($debug) {
    @error_reporting(E_ALL | E_STRICT);
    @ini_set('display_errors', '1');
    $CFG->debug = (E_ALL | E_STRICT);
    $CFG->debugdisplay = 1;
}

require_once(__DIR__ . '/lib/setup.php');

// There is no php closing tag in this file,
// it is intentional because it prevents trailing whitespace problems!
"#;

/// Render the config.php for a recipe. Pure function of the recipe.
pub fn render(recipe: &Recipe) -> String {
    let mut out = String::from(HEADER);
    if recipe.include_phpunit {
        out.push_str(PHPUNIT_BLOCK);
    }
    out.push_str(FOOTER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(include_phpunit: bool) -> Recipe {
        Recipe {
            name: "test".to_string(),
            container_prefix: "test".to_string(),
            plugins: vec![],
            include_behat: true,
            include_phpunit,
        }
    }

    #[test]
    fn test_base_settings_always_present() {
        let php = render(&recipe(false));
        assert!(php.starts_with("<?php"));
        assert!(php.contains("$CFG->dbtype    = getenv('DB_TYPE');"));
        assert!(php.contains("$CFG->wwwroot   = getenv('WWW_ROOT');"));
        assert!(php.contains("$CFG->prefix    = 'mdl_';"));
        assert!(php.contains("require_once(__DIR__ . '/lib/setup.php');"));
        // No closing tag, ever.
        assert!(!php.contains("?>"));
    }

    #[test]
    fn test_phpunit_block_only_when_enabled() {
        assert!(!render(&recipe(false)).contains("phpunit_dataroot"));

        let php = render(&recipe(true));
        assert!(php.contains("$CFG->phpunit_dataroot = getenv('MOODLE_DATA').'/moodle-phpunit';"));
        assert!(php.contains("$CFG->phpunit_prefix = 'phu_';"));
    }

    #[test]
    fn test_debug_block_is_env_driven() {
        let php = render(&recipe(false));
        assert!(php.contains("$debug = getenv('DEBUG');"));
        assert!(php.contains("$CFG->debugdisplay = 1;"));
    }
}

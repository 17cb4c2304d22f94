//! Generated artifact templates.
//!
//! Renders the two text artifacts of a project directory from handlebars
//! templates: the Android manifest and the single WebView activity. Both are
//! pure functions of the derived identity plus one request field.

use std::collections::BTreeMap;

use handlebars::Handlebars;

use super::error::{Error, Result};
use super::identity::ProjectIdentity;

/// Android manifest declaring the package id, the INTERNET permission and
/// the launcher activity labelled with the app name.
const MANIFEST_TEMPLATE: &str = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"
    package="{{package_id}}">
    <uses-permission android:name="android.permission.INTERNET"/>
    <application android:allowBackup="true" android:icon="@mipmap/ic_launcher" android:label="{{app_name}}" android:theme="@style/Theme.MaterialComponents.DayNight.NoActionBar">
        <activity android:name=".MainActivity" android:exported="true">
            <intent-filter>
                <action android:name="android.intent.action.MAIN"/>
                <category android:name="android.intent.category.LAUNCHER"/>
            </intent-filter>
        </activity>
    </application>
</manifest>
"#;

/// Entry-point activity: a full-screen WebView with JavaScript enabled,
/// pointed at the requested URL.
const MAIN_ACTIVITY_TEMPLATE: &str = r#"package {{package_id}};

import android.app.Activity;
import android.os.Bundle;
import android.webkit.WebView;
import android.webkit.WebSettings;

public class MainActivity extends Activity {
    @Override
    protected void onCreate(Bundle savedInstanceState) {
        super.onCreate(savedInstanceState);
        WebView webView = new WebView(this);
        WebSettings webSettings = webView.getSettings();
        webSettings.setJavaScriptEnabled(true);
        webView.loadUrl("{{website_url}}");
        setContentView(webView);
    }
}
"#;

/// Registry of the project artifact templates.
///
/// Registration happens once at pipeline construction so a malformed
/// template surfaces at startup, not per request.
pub struct ArtifactTemplates {
    handlebars: Handlebars<'static>,
}

impl ArtifactTemplates {
    /// Registers both templates.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        // Raw substitution: XML escaping would corrupt URLs with & or '
        handlebars.register_escape_fn(handlebars::no_escape);

        handlebars
            .register_template_string("manifest", MANIFEST_TEMPLATE)
            .map_err(|e| Error::Template(format!("failed to register manifest template: {e}")))?;
        handlebars
            .register_template_string("main_activity", MAIN_ACTIVITY_TEMPLATE)
            .map_err(|e| {
                Error::Template(format!("failed to register main activity template: {e}"))
            })?;

        Ok(Self { handlebars })
    }

    /// Renders `AndroidManifest.xml` content for one project.
    pub fn render_manifest(&self, identity: &ProjectIdentity, app_name: &str) -> Result<String> {
        let mut data = BTreeMap::new();
        data.insert("package_id", identity.package_id.clone());
        data.insert("app_name", app_name.to_string());

        self.handlebars
            .render("manifest", &data)
            .map_err(|e| Error::Template(format!("failed to render manifest: {e}")))
    }

    /// Renders `MainActivity.java` content for one project.
    pub fn render_main_activity(
        &self,
        identity: &ProjectIdentity,
        website_url: &str,
    ) -> Result<String> {
        let mut data = BTreeMap::new();
        data.insert("package_id", identity.package_id.clone());
        data.insert("website_url", website_url.to_string());

        self.handlebars
            .render("main_activity", &data)
            .map_err(|e| Error::Template(format!("failed to render main activity: {e}")))
    }
}

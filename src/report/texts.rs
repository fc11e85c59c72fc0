// The fixed German texts of the report.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct HousingType {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Contact {
    pub name: &'static str,
    pub company: &'static str,
    pub street: &'static str,
    pub city: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
}

/// All the reference texts, as they are handed to the templates.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticTexts {
    pub usage_notice: &'static str,
    pub introduction: &'static str,
    pub introduction_odour: &'static str,
    pub introduction_classification: &'static str,
    pub building_law: [&'static str; 3],
    pub federal_emission_act: &'static str,
    pub objectives: [&'static str; 3],
    pub methodology: &'static str,
    pub methodology_difficulty: &'static str,
    pub methodology_effort: &'static str,
    pub methodology_ampel: &'static str,
    pub methodology_explanation: &'static str,
    pub methodology_reasons: &'static str,
    pub receptor_sites: &'static [&'static str],
    pub neighboring_operations: &'static str,
    pub housing_intro: &'static str,
    pub housing_types: &'static [HousingType],
    pub state_of_the_art: &'static str,
    pub housing_tables: &'static str,
    pub review_intro: &'static str,
    pub next_steps_intro: &'static str,
    pub next_steps: &'static [&'static str],
    pub contact: Contact,
    pub created_by: Contact,
}

pub const TEXTS: StaticTexts = StaticTexts {
    usage_notice: "Dieses Dokument stellt eine Serviceleistung des Ingenieurbüros Richters & Hüls \
        dar und dient ausschließlich zur immissionsschutztechnischen Vorabschätzung im \
        Rahmen des benannten Projekts. Es ist nicht zur rechtlich verbindlichen Bewertung \
        geeignet und ersetzt keine gutachterliche Stellungnahme im Genehmigungsverfahren.",

    introduction: "Die immissionsschutzrechtliche Beurteilung von landwirtschaftlichen \
        Tierhaltungsanlagen wird auf Grundlage des Bundes-Immissionsschutzgesetzes \
        (BImSchG) durchgeführt. Für die Bewertung von Geruchs- und \
        Stickstoffimmissionen ist insbesondere die Technische Anleitung zur \
        Reinhaltung der Luft (TA Luft, Fassung 2021) maßgeblich. Diese legt \
        Schwellenwerte und Beurteilungsmaßstäbe fest, die sich nach der \
        Empfindlichkeit der betroffenen Nutzung richten \u{2013} etwa für Wohngebiete, \
        den Außenbereich oder naturnahe Flächen.",

    introduction_odour: "Geruchsimmissionen werden anhand des Anteils sogenannter Geruchsstunden \
        am Jahresmittel beurteilt. Die TA Luft sieht dabei abgestufte \
        Immissionswerte vor, abhängig von der Schutzwürdigkeit des Gebiets. Auch \
        für Stickstoffeinträge gelten differenzierte Prüfkriterien, insbesondere \
        wenn empfindliche Ökosysteme oder Schutzgebiete betroffen sind. In solchen \
        Fällen können bereits geringe Zusatzbelastungen zu einer Prüfpflicht führen.",

    introduction_classification: "Wesentlich für die immissionsschutzrechtliche Bewertung ist die rechtliche \
        Einstufung des Vorhabens. Je nachdem, ob es sich um eine baurechtlich \
        genehmigte Anlage oder eine genehmigungsbedürftige Anlage nach BImSchG \
        handelt, ergeben sich unterschiedliche Anforderungen an die Vorgehensweise.",

    building_law: [
        "Für Anlagen, die ausschließlich baurechtlich genehmigt werden müssen, kann \
        im günstigsten Fall nachgewiesen werden, dass die durch das geplante \
        Vorhaben verursachte Zusatzbelastung unterhalb der sogenannten \
        Irrelevanzkriterien liegt. In diesem Fall ist aus immissionsschutzfachlicher \
        Sicht keine weitergehende Begutachtung notwendig.",
        "Wenn die ermittelten Wahrnehmungshäufigkeiten die Irrelevanzschwelle für \
        Gerüche überschreiten ist eine vertiefende Auseinandersetzung mit den \
        Immissionen erforderlich. Dies kann entweder über Maßnahmen zur \
        Verbesserung der Bestandssituation erfolgen, etwa durch bauliche Änderungen \
        oder Umstrukturierungen bestehender Stallanlagen, oder durch eine \
        umfassende Gesamtbelastungsbetrachtung.",
        "Letztere erfordert die Ermittlung aller relevanten Immissionsquellen im \
        Umfeld. Dabei müssen nicht nur die Emissionen des geplanten Vorhabens, \
        sondern auch die benachbarten Betriebe berücksichtigt werden. Dies setzt \
        in der Regel ein detailliertes Aktenstudium bei der Genehmigungsbehörde \
        voraus, um die genehmigten Tierplatzzahlen und Anlagentypen zu erfassen.",
    ],

    federal_emission_act: "Bei genehmigungsbedürftigen Anlagen im Sinne des BImSchG entfällt die \
        Möglichkeit, sich auf Irrelevanzkriterien zu berufen. Das bedeutet, dass \
        eine Erhebung der Gesamtbelastungsbetrachtung vorzunehmen ist. Dabei geht \
        es darum, alle relevanten Emissionsquellen in der Umgebung zu \
        identifizieren, ihre Auswirkungen zu ermitteln und detailliert zu bewerten.",

    objectives: [
        "Um Landwirtinnen und Landwirten bereits in einem frühen Stadium der \
        Planung eine verlässliche und kostengünstige Einschätzung zu ermöglichen, \
        haben wir ein Verfahren zur automatisierten Vorabschätzung entwickelt.",
        "Diese Vorabschätzung unterstützt landwirtschaftliche Betriebe dabei, den \
        Aufwand und die Schwierigkeit geplanter Änderungen in der Tierhaltung aus \
        immissionsschutzrechtlicher Sicht frühzeitig einzuschätzen. Basierend auf \
        den spezifischen Vorhabensdaten sowie den örtlichen Gegebenheiten kann \
        ermittelt werden, ob das geplante Vorhaben voraussichtlich \
        genehmigungsfähig ist.",
        "Das Verfahren erlaubt eine effiziente, standardisierte Bewertung \
        immissionsschutzrelevanter Fragen und trägt dazu bei, \
        Planungsunsicherheiten zu minimieren und unnötige Kosten in späteren \
        Genehmigungsphasen zu vermeiden.",
    ],

    methodology: "Im Rahmen dieser Vorabschätzung erfolgt eine strukturierte fachliche \
        Einordnung der wesentlichen immissionsschutzrechtlich relevanten Inhalte. \
        Für jedes zentrale Kapitel nehmen wir jeweils eine Einschätzung zur \
        Schwierigkeit sowie zum erwarteten Aufwand vor.",

    methodology_difficulty: "Hier schauen wir, wie groß das Risiko ist, dass es im weiteren Verlauf \
        Probleme oder Konflikte gibt \u{2013} zum Beispiel mit Nachbarn oder Behörden. \
        Je höher die Schwierigkeit, desto größer ist die Chance, dass es im \
        Verfahren zu Rückfragen oder Widerstand kommt.",

    methodology_effort: "Das zeigt, wie viel Arbeit und Zeit wir voraussichtlich investieren \
        müssen. Das ist wichtig für die Kostenschätzung.",

    methodology_ampel: "Die Einschätzung durch ein Ampelsystem bewertet. Der Bewertungsmaßstab \
        ist in der folgenden Tabelle dargestellt:",

    methodology_explanation: "Grün heißt: Alles im grünen Bereich \u{2013} hier ist der Aufwand gering und \
        Probleme sind eher unwahrscheinlich. Gelb bedeutet: Hier sollte man \
        genauer hinschauen, denn das sind Punkte, die entweder mehr Arbeit machen \
        oder schwieriger werden könnten. Rot zeigt: Das sind wirklich kritische \
        Themen im Immissionsschutz, die man möglichst früh klären sollte, um \
        späteren Aufwand zu vermeiden.",

    methodology_reasons: "Für Aufwände und Schwierigkeiten im gelben und roten Bereiche werden \
        textuelle Begründungen für die Einstufung gegeben. Bei grünen Einstufungen \
        entfällt dies, da hier keine besonderen Herausforderungen zu erwarten sind.",

    receptor_sites: &[
        "Immissionsorte sind diejenigen Orte, an denen die Auswirkungen der \
        Emissionen eines Vorhabens beurteilt werden. Sie repräsentieren \
        schutzbedürftige Nutzungen im Sinne des Immissionsschutzrechts, \
        insbesondere Wohngebäude, Arbeitsstätten sowie empfindliche Einrichtungen \
        wie Schulen oder Krankenhäuser.",
        "Für Stickstoffeinträge ist darüber hinaus die Beurteilung von Biotopen \
        und anderen empfindlichen Ökosystemen von Bedeutung. Besonders \
        schützenswerte Flächen, wie FFH-Gebiete, Naturschutzgebiete oder \
        gesetzlich geschützte Biotope, müssen hinsichtlich zusätzlicher \
        Stickstoffbelastungen gesondert betrachtet werden, da bereits geringe \
        Einträge zu ökologisch relevanten Veränderungen führen können.",
        "Für die vorliegende Vorabschätzung wurden alle im Umkreis des Vorhabens \
        liegenden Nutzungen berücksichtigt, die im Sinne der TA Luft als relevant \
        einzustufen sind. Grundlage hierfür ist in der Regel eine Auswertung \
        amtlicher Luftbilder, Liegenschaftskarten oder georeferenzierter \
        Datenquellen.",
        "Die genaue Festlegung der Immissionsorte erfolgt automatisiert anhand \
        eines GIS-gestützten Analyseverfahrens, wobei insbesondere der Abstand \
        zur Anlage, die Art der Nutzung und die potenzielle Betroffenheit durch \
        Gerüche und Stickstoffeinträge berücksichtigt werden. Die Immissionsorte \
        dienen als Grundlage für die folgende Schwierigkeitsabschätzung.",
    ],

    neighboring_operations: "Im Rahmen der Vorabschätzung werden auch benachbarte landwirtschaftliche \
        Betriebe berücksichtigt, die potenziell relevante Emissionen verursachen \
        können. Diese Betriebe werden in der Regel anhand von Luftbildern und \
        amtlichen Karten ermittelt. Die Erfassung der Nachbarbetriebe erfolgt \
        automatisiert und umfasst alle Betriebe, die innerhalb eines festgelegten \
        Umkreises um das Vorhaben liegen. Dabei werden insbesondere die \
        Tierhaltungsarten, die Anzahl der Tierplätze sowie die Art der \
        Stallanlagen erfasst. Diese Informationen sind entscheidend für die \
        Gesamtbewertung der Immissionen und deren Auswirkungen auf die Umgebung.",

    housing_intro: "Die Ausführung der Stallanlagen wird hinsichtlich ihres Lüftungsprinzips \
        und eventueller Ausläufe unterschieden. Es kommen folgende Ausführungen \
        zur Anwendung:",

    housing_types: &[
        HousingType {
            name: "Zwangsbelüfteter Stall",
            description: "Geschlossener Stall mit mechanischer Lüftung und gezielter \
                Abluftabführung über Kamine.",
        },
        HousingType {
            name: "Zwangsbelüfteter Stall mit Auslauf",
            description: "Wie oben, zusätzlich mit Auslaufbereich im Freien; verändert \
                Emissionsverhalten durch zusätzliche Quellen.",
        },
        HousingType {
            name: "Außenklimastall",
            description: "Offen gestalteter Stall mit natürlichem Luftaustausch über Öffnungen \
                in Wand und/oder Dach.",
        },
        HousingType {
            name: "Außenklimastall mit Auslauf",
            description: "Außenklimastall mit zusätzlichem Auslaufbereich, in dem Tiere \
                regelmäßig Zugang zum Freien haben.",
        },
    ],

    state_of_the_art: "Der Stand der Technik gilt in dieser Vorabschätzung als erfüllt, wenn \
        die Abluft über einen mindestens 10\u{202f}m hohen Schornstein abgeführt wird, \
        der Austrittspunkt mindestens 3\u{202f}m über dem First liegt und die \
        Austrittsgeschwindigkeit mindestens 7\u{202f}m/s beträgt. Werden diese \
        Anforderungen nicht eingehalten, gilt der Stand der Technik als nicht \
        erfüllt. Die Ausführung der Abluftführung stellt dabei ein wesentliches \
        Kriterium für die Einschätzung der Schwierigkeit der entstehenden \
        Immissionen dar.",

    housing_tables: "Die nachfolgenden Tabellen geben einen Überblick über den aktuellen \
        Anlagenbestand (Ist-Zustand) sowie die geplanten Änderungen (Plan-Zustand).",

    review_intro: "Die genaue Prüfungserfordernis wird erst nach Absprache mit der \
        Genehmigungsbehörde festgelegt. Unserer Einschätzung nach sind folgende \
        Parameter für die immissionsschutzrechtliche Beurteilung relevant:",

    next_steps_intro: "Automatisierung hilft uns, die immissionsschutzrechtliche Beurteilung \
        effizient und kostengünstig durchzuführen. Durch dieses effiziente \
        Vorgehen haben wir mehr Zeit, uns mit allen Projektbeteiligen persönlich \
        zu beraten und die bestmögliche Lösung zu finden. Als persönlicher \
        Ansprechpartner steht Ihnen in diesem Projekt zur Verfügung:",

    next_steps: &[
        "Gemeinsame Absprache zum weiteren Vorgehen bezüglich der immissionsschutzrechtlichen Beurteilung.",
        "Absprache mit der Genehmigungsbehörde über die Notwendigkeit der immissionsschutzfachlichen Gutachten.",
        "Ermittlung der Geruchsimmissionen durch Ausbreitungsberechnung und Abschätzung des weiteren Vorgehens.",
        "Falls erforderlich: Ermittlung der relevanten Betriebe, die als Vorbelastung für die Gesamtbelastungsbetrachtung herangezogen werden müssen.",
        "Falls erforderlich: Erhebung der Tierplatzzahlen und Anlagentypen der relevanten Betriebe.",
        "Falls erforderlich: Durchführung einer Gesamtbelastungsbetrachtung.",
        "Darstellung der Ergebnisse in einem Gutachten, das die immissionsschutzrechtliche Relevanz des Vorhabens abschließend bewertet.",
    ],

    contact: Contact {
        name: "Herr Andre Feldhaus",
        company: "Ingenieurbüro Richters & Hüls",
        street: "Erhardstraße 9",
        city: "48683 Ahaus",
        phone: "02561 / 43004-01",
        email: "feldhaus@richtershuels.de",
    },

    created_by: Contact {
        name: "B. Eng. Andre Feldhaus",
        company: "Ingenieurbüro Richters & Hüls",
        street: "Erhardstraße 9",
        city: "48683 Ahaus",
        phone: "02561 / 43004",
        email: "info@richtershuels.de",
    },
};

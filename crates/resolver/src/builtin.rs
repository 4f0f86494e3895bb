//! Built-in Static Knowledge Table contents (English and German).

/// `(topic, intent, keywords, response)`
pub(crate) type BuiltinEntry = (
    &'static str,
    &'static str,
    &'static [&'static str],
    &'static str,
);

pub(crate) const ENGLISH: &[BuiltinEntry] = &[
    (
        "speed_limit",
        "speed_limit",
        &["speed", "limit", "fast", "mph", "kmh", "highway", "city", "urban"],
        "Speed limits vary by location and road type. Generally:\n\
         • City/Urban areas: 25-35 mph (40-55 km/h)\n\
         • Suburban areas: 35-45 mph (55-70 km/h)\n\
         • Highways: 55-80 mph (90-130 km/h)\n\
         • School zones: 15-25 mph (25-40 km/h)\n\n\
         Always check local speed limit signs as they may differ.",
    ),
    (
        "phone_driving",
        "phone_usage",
        &["phone", "cell", "mobile", "text", "call", "hands-free"],
        "Using a phone while driving is restricted in most places:\n\
         • Handheld devices are typically prohibited\n\
         • Hands-free calling is usually allowed\n\
         • Texting while driving is illegal in most jurisdictions\n\
         • Use voice commands or pull over safely to use your phone\n\
         • Always prioritize safety over convenience.",
    ),
    (
        "alcohol_limit",
        "alcohol_limit",
        &["alcohol", "drink", "blood", "bac", "drunk", "dui", "dwi", "limit"],
        "Blood Alcohol Content (BAC) limits for drivers:\n\
         • Most countries: 0.08% (0.08 g/100ml)\n\
         • Some countries (like Germany): 0.05%\n\
         • Commercial drivers: Often 0.04% or lower\n\
         • New/young drivers: May have 0.00% tolerance\n\n\
         Best practice: Don't drink and drive at all. Use designated drivers, taxis, or public transport.",
    ),
    (
        "seatbelt",
        "safety_requirements",
        &[
            "seatbelt",
            "seat belt",
            "buckle",
            "safety belt",
            "safety requirement",
            "safety",
            "belt",
        ],
        "Seatbelt safety requirements:\n\
         • Driver and all passengers must wear seatbelts\n\
         • Children require appropriate car seats/booster seats based on age/weight\n\
         • Front and rear seat passengers are required to buckle up\n\
         • Failure to wear seatbelts can result in fines\n\
         • Seatbelts reduce injury risk by about 45% and death risk by 50%\n\
         • Always adjust seatbelt properly across chest and hips",
    ),
    (
        "child_safety",
        "safety_requirements",
        &["child seat", "car seat", "booster", "children", "kids", "infant", "toddler"],
        "Child safety seat requirements:\n\
         • Rear-facing seats: Birth to 2 years (or until max height/weight)\n\
         • Forward-facing seats: 2-4 years with harness\n\
         • Booster seats: 4-8 years (until seatbelt fits properly)\n\
         • Children under 13 should ride in back seat\n\
         • Always follow manufacturer's instructions\n\
         • Replace car seats after accidents",
    ),
    (
        "phone_usage",
        "safety_requirements",
        &[
            "phone",
            "cell",
            "mobile",
            "text",
            "call",
            "hands-free",
            "bluetooth",
            "driving",
            "safety requirement",
        ],
        "Phone usage safety requirements while driving:\n\
         • Handheld phone calls are prohibited in most places\n\
         • Texting while driving is illegal and extremely dangerous\n\
         • Use hands-free/Bluetooth devices for calls\n\
         • Voice commands are safer than manual input\n\
         • Pull over safely if you must use your phone\n\
         • Never text, email, or browse while driving",
    ),
    (
        "stop_sign",
        "stop_sign",
        &["stop", "sign", "intersection", "complete stop"],
        "At a stop sign:\n\
         • Come to a complete stop before the stop line\n\
         • If no stop line, stop before entering the crosswalk\n\
         • If no crosswalk, stop before entering the intersection\n\
         • Look left, right, then left again\n\
         • Yield to pedestrians and other vehicles with right-of-way\n\
         • Proceed only when safe",
    ),
    (
        "parking",
        "parking_regulations",
        &["park", "parking", "parallel", "reverse", "space", "curb", "meter", "zone"],
        "Parking regulations and tips:\n\
         • No parking within 15 feet of fire hydrants\n\
         • No parking in handicapped spaces without permits\n\
         • Check time limits and pay parking meters\n\
         • Parallel parking: Find space 1.5x car length, align mirrors, reverse with full turn, straighten, adjust\n\
         • Don't block driveways, crosswalks, or bus stops\n\
         • Park in same direction as traffic flow",
    ),
    (
        "right_of_way",
        "right_of_way",
        &[
            "right",
            "way",
            "yield",
            "priority",
            "who goes first",
            "intersection",
            "stop sign",
            "traffic light",
        ],
        "Right-of-way rules at intersections:\n\
         • At 4-way stop: First to arrive goes first, if simultaneous arrival, rightmost vehicle goes\n\
         • At uncontrolled intersection: Vehicle on right has right-of-way\n\
         • Left turns always yield to oncoming traffic\n\
         • Emergency vehicles (ambulance, fire, police) always have right-of-way\n\
         • Pedestrians have right-of-way at marked crosswalks\n\
         • When in doubt, yield and proceed cautiously",
    ),
    (
        "traffic_signs",
        "traffic_signs",
        &[
            "traffic signs",
            "stop sign",
            "yield",
            "speed limit sign",
            "warning",
            "regulatory",
            "guide signs",
        ],
        "Common traffic signs and meanings:\n\
         • STOP: Complete stop required before proceeding\n\
         • YIELD: Slow down, give right-of-way to other traffic\n\
         • Speed Limit: Maximum safe speed allowed\n\
         • No Parking: Parking prohibited in this area\n\
         • School Zone: Reduced speed when children present\n\
         • Construction Zone: Slow down, workers present\n\
         • Always obey all posted traffic signs",
    ),
    (
        "greeting",
        "greeting",
        &[
            "hello",
            "hi",
            "help",
            "what can you do",
            "how are you",
            "hey",
            "good morning",
            "good afternoon",
            "good evening",
            "hey there",
            "what can you help",
            "what do you do",
        ],
        "Hello! I'm Driver's Friend, your driving regulations assistant. I can help you with:\n\
         • Speed limits and traffic rules\n\
         • Parking regulations\n\
         • Right-of-way rules\n\
         • Safety requirements (seatbelts, phone usage)\n\
         • Alcohol limits and DUI laws\n\
         • Traffic signs and signals\n\n\
         What driving question can I help you with today?",
    ),
    (
        "farewell",
        "farewell",
        &[
            "bye",
            "goodbye",
            "see you",
            "thanks",
            "thank you",
            "thx",
            "that's all",
            "nothing else",
            "thanks for your help",
            "thank you for your help",
            "appreciate it",
            "thank you so much",
            "thanks a lot",
            "many thanks",
            "i appreciate it",
            "appreciate your help",
            "helpful",
            "you helped me",
            "this helped",
            "very helpful",
        ],
        "You're welcome! Drive safely and feel free to ask me anytime about traffic rules. Have a great day! 🚗",
    ),
    (
        "help",
        "help",
        &[
            "help me",
            "what can you do",
            "capabilities",
            "features",
            "what do you know",
            "how can you help",
        ],
        "I'm your personal driving assistant! I can help you with:\n\n\
         🚦 Traffic Rules & Regulations\n\
         🚗 Speed limits for different areas\n\
         📱 Phone usage while driving\n\
         🍺 Alcohol limits and DUI laws\n\
         🔧 Parking and maneuvering tips\n\
         ⚠️ Safety requirements and best practices\n\n\
         Just ask me any driving-related question!",
    ),
];

pub(crate) const GERMAN: &[BuiltinEntry] = &[
    (
        "speed_limit",
        "speed_limit",
        &["geschwindigkeit", "limit", "schnell", "kmh", "autobahn", "stadt"],
        "Geschwindigkeitsbegrenzungen in Deutschland:\n\
         • Innerorts: 50 km/h\n\
         • Außerorts: 100 km/h\n\
         • Autobahn: Richtgeschwindigkeit 130 km/h (oft keine Begrenzung)\n\
         • Spielstraße: Schrittgeschwindigkeit\n\
         • Bei Regen/schlechten Bedingungen gelten niedrigere Limits",
    ),
    (
        "alcohol_limit",
        "alcohol_limit",
        &["alkohol", "promille", "trinken", "betrunken", "fahren"],
        "Alkoholgrenzwerte in Deutschland:\n\
         • Allgemein: 0,5 Promille\n\
         • Fahranfänger (erste 2 Jahre): 0,0 Promille\n\
         • Unter 21 Jahren: 0,0 Promille\n\
         • Ab 0,3 Promille bei Fahrauffälligkeiten: Strafbar\n\
         • Empfehlung: Gar nicht trinken wenn Sie fahren müssen",
    ),
    (
        "seatbelt",
        "safety_requirements",
        &["sicherheitsgurt", "gurt", "anschnallen", "sicherheit", "safety"],
        "Sicherheitsgurt-Vorschriften in Deutschland:\n\
         • Fahrer und alle Mitfahrer müssen angeschnallt sein\n\
         • Kinder benötigen altersgerechte Kindersitze\n\
         • Vorder- und Rücksitze: Anschnallpflicht\n\
         • Verstoß kann Bußgeld zur Folge haben\n\
         • Sicherheitsgurte reduzieren Verletzungsrisiko um 45%",
    ),
    (
        "child_safety",
        "safety_requirements",
        &["kindersitz", "kinder", "baby", "kleinkind", "sicherheit"],
        "Kindersicherheit im Auto:\n\
         • Rückwärtsgerichtete Sitze: Geburt bis 2 Jahre\n\
         • Vorwärtsgerichtete Sitze: 2-4 Jahre mit Gurt\n\
         • Sitzerhöhung: 4-8 Jahre (bis Gurt richtig sitzt)\n\
         • Kinder unter 12 Jahren sollten hinten sitzen\n\
         • Nach Unfall Kindersitz ersetzen",
    ),
    (
        "phone_usage",
        "safety_requirements",
        &["handy", "telefon", "smartphone", "freisprechanlage", "telefonieren", "sms"],
        "Handy-Nutzung beim Fahren:\n\
         • Handheld-Telefonate sind verboten\n\
         • SMS oder WhatsApp während der Fahrt sind illegal\n\
         • Freisprecheinrichtung oder Bluetooth verwenden\n\
         • Sprachbefehle sind sicherer als manuelle Eingabe\n\
         • Bei Bedarf sicher anhalten und parken",
    ),
    (
        "parking",
        "parking_regulations",
        &["parken", "parkplatz", "einparken", "parallel", "parkverbot"],
        "Parkvorschriften in Deutschland:\n\
         • Nicht vor Feuerwehrzufahrten parken\n\
         • Behindertenparkplätze nur mit Ausweis\n\
         • Parkscheinautomaten und Zeiten beachten\n\
         • Einparken: Platz 1,5x Autolänge, Spiegel ausrichten, rückwärts einparken\n\
         • Nicht vor Einfahrten oder Zebrastreifen parken",
    ),
    (
        "right_of_way",
        "right_of_way",
        &["vorfahrt", "vorrang", "kreuzung", "rechts vor links"],
        "Vorfahrtsregeln an Kreuzungen:\n\
         • Rechts vor Links an gleichberechtigten Kreuzungen\n\
         • Vorfahrtstraße hat immer Vorrang\n\
         • Linksabbieger müssen Gegenverkehr durchlassen\n\
         • Rettungsfahrzeuge haben immer Vorfahrt\n\
         • Fußgänger an Zebrastreifen haben Vorrang\n\
         • Im Zweifel: Vorsicht und nachgeben",
    ),
    (
        "traffic_signs",
        "traffic_signs",
        &["verkehrszeichen", "schilder", "stop", "vorfahrt", "geschwindigkeit"],
        "Wichtige Verkehrszeichen:\n\
         • STOP-Schild: Vollständig anhalten erforderlich\n\
         • Vorfahrt gewähren: Verlangsamen, anderen Vorrang geben\n\
         • Geschwindigkeitsbegrenzung: Höchstgeschwindigkeit beachten\n\
         • Parkverbot: Parken in diesem Bereich verboten\n\
         • Schulzone: Reduzierte Geschwindigkeit bei Kindern\n\
         • Alle Verkehrszeichen sind zu befolgen",
    ),
    (
        "greeting",
        "greeting",
        &[
            "hallo",
            "hi",
            "guten tag",
            "guten morgen",
            "hey",
            "hilfe",
            "was kannst du",
            "wie geht",
        ],
        "Hallo! Ich bin Driver's Friend, Ihr Assistent für Verkehrsregeln. Ich kann Ihnen helfen bei:\n\
         • Geschwindigkeitsbegrenzungen\n\
         • Verkehrsregeln und -zeichen\n\
         • Parkvorschriften\n\
         • Sicherheitsbestimmungen\n\
         • Alkoholgrenzwerte\n\n\
         Welche Frage zum Fahren kann ich Ihnen beantworten?",
    ),
    (
        "farewell",
        "farewell",
        &[
            "tschüss",
            "auf wiedersehen",
            "danke",
            "vielen dank",
            "das wars",
            "danke für die hilfe",
            "vielen dank für die hilfe",
            "ich schätze es",
            "danke vielmals",
            "herzlichen dank",
            "besten dank",
            "danke schön",
            "dankeschön",
            "das hat geholfen",
            "sehr hilfreich",
            "du hast mir geholfen",
            "das war hilfreich",
        ],
        "Gerne geschehen! Fahren Sie sicher und fragen Sie mich jederzeit bei Verkehrsregeln. Schönen Tag noch! 🚗",
    ),
];
